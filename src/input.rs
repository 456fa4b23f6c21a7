//! Stdin payload reader
//!
//! A webhook invocation receives its context as one JSON document on
//! standard input. The whole stream is consumed before parsing; a
//! `scriptParam.logLevel` override is applied to the logger before the
//! payload is handed back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{Result, WebhookError};
use crate::logging::{LogLevel, Logger};

/// The JSON document a webhook receives on stdin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookPayload(Value);

impl WebhookPayload {
    /// Wrap an already-parsed JSON value
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw JSON document
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.0
    }

    /// Consume the payload, returning the raw JSON document
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Base URL of the SPIDAmin server (`minServer`)
    pub fn min_server(&self) -> Result<&str> {
        self.required_str("minServer")
    }

    /// API credential (`apiToken`)
    pub fn api_token(&self) -> Result<&str> {
        self.required_str("apiToken")
    }

    /// Decoded `scriptParam`
    ///
    /// The field is normally JSON text; an inline object is accepted as is.
    /// Text that does not parse yields `None`.
    #[must_use]
    pub fn script_param(&self) -> Option<Value> {
        match self.0.get("scriptParam")? {
            Value::String(text) => serde_json::from_str(text).ok(),
            other @ Value::Object(_) => Some(other.clone()),
            _ => None,
        }
    }

    /// Log level requested through `scriptParam.logLevel`
    #[must_use]
    pub fn log_level_override(&self) -> Option<LogLevel> {
        let param = self.script_param()?;
        param.get("logLevel")?.as_str().map(LogLevel::parse_lenient)
    }

    /// The current project document (`payload.part`)
    #[must_use]
    pub fn project(&self) -> Option<&Value> {
        self.0.get("payload")?.get("part")
    }

    /// Id of the current project (`payload.part.id`)
    #[must_use]
    pub fn project_id(&self) -> Option<u64> {
        self.project()?.get("id")?.as_u64()
    }

    fn required_str(&self, key: &str) -> Result<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| WebhookError::MissingField(key.to_string()))
    }
}

/// Read a reader to end-of-stream and parse it as a webhook payload
///
/// The logger's level is replaced when the payload carries a
/// `scriptParam.logLevel`; unrecognized names silence the logger.
pub async fn read_payload<R>(mut reader: R, logger: &mut Logger) -> Result<WebhookPayload>
where
    R: AsyncRead + Unpin,
{
    let mut input = String::new();
    reader.read_to_string(&mut input).await?;

    let value: Value = serde_json::from_str(&input).map_err(WebhookError::MalformedInput)?;
    let payload = WebhookPayload::new(value);

    if let Some(level) = payload.log_level_override() {
        logger.set_level(level);
    }
    logger.debug(format!("json passed into webhook: \n{}\n", payload.value()));

    Ok(payload)
}

/// Read the webhook payload from the process's standard input
pub async fn read_stdin_payload(logger: &mut Logger) -> Result<WebhookPayload> {
    read_payload(tokio::io::stdin(), logger).await
}
