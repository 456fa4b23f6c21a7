//! Configuration file
//!
//! An optional TOML file supplies the default log level and fallback server
//! settings. Lookup order: explicit path, `$SPIDA_WEBHOOK_CONFIG`, then
//! `~/.config/spida-webhook/config.toml` (XDG standard).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::WebhookPayload;
use crate::logging::LogLevel;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "SPIDA_WEBHOOK_CONFIG";

/// Webhook helper configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Log level used unless the payload overrides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// Server fallbacks
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server settings used when the payload omits them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Fallback for the payload's `minServer`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_server: Option<String>,

    /// Fallback for the payload's `apiToken`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl ServerConfig {
    /// Server URL: the payload's if present, else this fallback
    pub fn resolve_min_server<'p>(&'p self, payload: &'p WebhookPayload) -> Result<&'p str> {
        payload.min_server().or_else(|err| self.min_server.as_deref().ok_or(err))
    }

    /// API token: the payload's if present, else this fallback
    pub fn resolve_api_token<'p>(&'p self, payload: &'p WebhookPayload) -> Result<&'p str> {
        payload.api_token().or_else(|err| self.api_token.as_deref().ok_or(err))
    }
}

impl WebhookConfig {
    /// Default config file location
    #[must_use]
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR).map_or_else(
            || {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("spida-webhook")
                    .join("config.toml")
            },
            PathBuf::from,
        )
    }

    /// Load from `path`, or from [`default_path`](Self::default_path)
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from a file that must exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Log level after applying an optional command-line override
    #[must_use]
    pub fn effective_log_level(&self, cli_level: Option<LogLevel>) -> LogLevel {
        cli_level.or(self.log_level).unwrap_or_default()
    }
}
