//! SPIDAmin project API client
//!
//! Every operation issues exactly one request through an [`HttpExecutor`].
//! The project id is always passed explicitly; callers that want the id of
//! the project that triggered the webhook read it from
//! [`WebhookPayload::project_id`].

use serde_json::Value;

use crate::error::{Result, WebhookError};
use crate::http::{
    HttpExecutor, HttpMethod, OnResponse, RequestDescriptor, ServerTarget, Transport,
    default_response_handler, project_update_response_handler,
};
use crate::input::WebhookPayload;
use crate::logging::Logger;
use crate::models::{DataForm, LogMessage, ProjectCode, ProjectPatch};

/// Project query endpoint
pub const GET_PROJECTS_PATH: &str = "/projectmanager/projectAPI/getProjects";
/// Project create/update endpoint
pub const CREATE_OR_UPDATE_PATH: &str = "/projectmanager/projectAPI/createOrUpdate";
/// Project log message endpoint
pub const ADD_LOG_MESSAGE_PATH: &str = "/projectmanager/projectAPI/addLogMessage";

/// Client for one SPIDAmin server
#[derive(Debug)]
pub struct ProjectClient<'a, T> {
    target: ServerTarget,
    api_token: String,
    executor: HttpExecutor<'a, T>,
}

impl<'a, T: Transport> ProjectClient<'a, T> {
    /// Create a client for the server at `min_server`
    pub fn new(
        min_server: &str,
        api_token: impl Into<String>,
        transport: &'a T,
        logger: &'a Logger,
    ) -> Result<Self> {
        Ok(Self {
            target: ServerTarget::parse(min_server)?,
            api_token: api_token.into(),
            executor: HttpExecutor::new(transport, logger),
        })
    }

    /// Create a client from the payload's `minServer` and `apiToken`
    pub fn from_payload(payload: &WebhookPayload, transport: &'a T, logger: &'a Logger) -> Result<Self> {
        Self::new(payload.min_server()?, payload.api_token()?, transport, logger)
    }

    /// Server this client talks to
    #[must_use]
    pub const fn target(&self) -> &ServerTarget {
        &self.target
    }

    // =========================================================================
    // FETCH
    // =========================================================================

    /// Describe the request that fetches one project
    #[must_use]
    pub fn fetch_descriptor<'h>(&self, project_id: u64, details: bool) -> RequestDescriptor<'h> {
        let path = format!(
            "{GET_PROJECTS_PATH}?apiToken={}&project_ids=[{project_id}]&details={details}",
            self.api_token
        );
        RequestDescriptor::new(&self.target, HttpMethod::Get, path)
    }

    /// Fetch one project document
    ///
    /// Fails when the server does not answer 200, when the body is not JSON,
    /// or when it holds no `result.projects[0]`.
    pub async fn fetch_project(&self, project_id: u64, details: bool) -> Result<Value> {
        let mut project = None;
        let descriptor = self.fetch_descriptor(project_id, details).with_on_response(
            OnResponse::handler(|response, logger| {
                default_response_handler(response, logger)?;
                project = Some(extract_project(&response.body, project_id)?);
                Ok(())
            }),
        );

        self.executor.send_request(descriptor).await?;
        project.ok_or(WebhookError::ProjectNotFound { id: project_id })
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Describe the request that applies `patch`
    ///
    /// Without a custom handler the project-update handler is used.
    pub fn update_descriptor<'h>(
        &self,
        patch: &ProjectPatch,
        on_response: OnResponse<'h>,
    ) -> Result<RequestDescriptor<'h>> {
        let project_json = serde_json::to_string(patch).map_err(WebhookError::Serialize)?;
        self.executor.logger().debug(format!("project update: {project_json}"));

        let body = format!("project_json={}", urlencoding::encode(&project_json));
        let path = format!("{CREATE_OR_UPDATE_PATH}?apiToken={}", self.api_token);

        Ok(RequestDescriptor::new(&self.target, HttpMethod::Post, path)
            .with_form_body(body)
            .with_on_response(OnResponse::Handler(
                on_response.or_default(project_update_response_handler),
            )))
    }

    /// Send a partial project document to the server
    pub async fn update_project(&self, patch: &ProjectPatch, on_response: OnResponse<'_>) -> Result<()> {
        let descriptor = self.update_descriptor(patch, on_response)?;
        self.executor.send_request(descriptor).await
    }

    /// Move the project to a new status
    pub async fn set_project_status(
        &self,
        project_id: u64,
        new_status: &str,
        on_response: OnResponse<'_>,
    ) -> Result<()> {
        let patch = ProjectPatch::new(project_id).with_status(new_status);
        self.update_project(&patch, on_response).await
    }

    /// Replace one data form on the project
    pub async fn set_project_form(
        &self,
        project_id: u64,
        form: DataForm,
        on_response: OnResponse<'_>,
    ) -> Result<()> {
        let patch = ProjectPatch::new(project_id).with_form(form);
        self.update_project(&patch, on_response).await
    }

    /// Attach project codes to the project
    pub async fn set_project_codes(
        &self,
        project_id: u64,
        codes: Vec<ProjectCode>,
        on_response: OnResponse<'_>,
    ) -> Result<()> {
        let patch = ProjectPatch::new(project_id).with_codes(codes);
        self.update_project(&patch, on_response).await
    }

    // =========================================================================
    // LOG MESSAGES
    // =========================================================================

    /// Describe the request that appends a log message
    pub fn log_message_descriptor<'h>(
        &self,
        project_id: u64,
        log_message: &LogMessage,
        on_response: OnResponse<'h>,
    ) -> Result<RequestDescriptor<'h>> {
        let log_message_json = serde_json::to_string(log_message).map_err(WebhookError::Serialize)?;
        let body = format!(
            "project_id={project_id}&log_message_json={}",
            urlencoding::encode(&log_message_json)
        );
        let path = format!("{ADD_LOG_MESSAGE_PATH}?apiToken={}", self.api_token);

        Ok(RequestDescriptor::new(&self.target, HttpMethod::Post, path)
            .with_form_body(body)
            .with_on_response(OnResponse::Handler(
                on_response.or_default(project_update_response_handler),
            )))
    }

    /// Append a message to the project's log history
    pub async fn add_project_log_message(
        &self,
        project_id: u64,
        log_message: &LogMessage,
        on_response: OnResponse<'_>,
    ) -> Result<()> {
        let descriptor = self.log_message_descriptor(project_id, log_message, on_response)?;
        self.executor.send_request(descriptor).await
    }
}

fn extract_project(body: &str, project_id: u64) -> Result<Value> {
    let mut value: Value = serde_json::from_str(body).map_err(WebhookError::MalformedResponse)?;
    value
        .pointer_mut("/result/projects/0")
        .map(Value::take)
        .ok_or(WebhookError::ProjectNotFound { id: project_id })
}
