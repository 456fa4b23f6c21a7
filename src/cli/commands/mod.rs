//! Command implementations

mod fetch;
mod update;

pub use fetch::{fetch, form_value};
pub use update::{codes, form, log_message, status};

use anyhow::anyhow;

use spida_webhook::config::WebhookConfig;
use spida_webhook::http::Transport;
use spida_webhook::input::WebhookPayload;
use spida_webhook::logging::Logger;
use spida_webhook::output::OutputMode;
use spida_webhook::project::ProjectClient;

use super::app::ProjectArg;

/// Everything a command needs for one invocation
#[derive(Debug)]
pub struct Context<'a, T> {
    pub payload: &'a WebhookPayload,
    pub config: &'a WebhookConfig,
    pub transport: &'a T,
    pub logger: &'a Logger,
    pub output_mode: OutputMode,
}

impl<'a, T: Transport> Context<'a, T> {
    /// Client for the server named by the payload (or the config fallback)
    fn client(&self) -> anyhow::Result<ProjectClient<'a, T>> {
        let server = &self.config.server;
        let client = ProjectClient::new(
            server.resolve_min_server(self.payload)?,
            server.resolve_api_token(self.payload)?,
            self.transport,
            self.logger,
        )?;
        Ok(client)
    }

    /// The `--project-id` argument, else the payload's `payload.part.id`
    fn project_id(&self, arg: ProjectArg) -> anyhow::Result<u64> {
        arg.project_id
            .or_else(|| self.payload.project_id())
            .ok_or_else(|| anyhow!("No project id: pass --project-id or send payload.part.id"))
    }
}
