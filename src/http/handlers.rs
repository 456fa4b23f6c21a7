//! Default response and error handlers
//!
//! These run when a descriptor leaves its handler as `UseDefault`.

use serde_json::Value;

use super::request::HttpResponse;
use crate::error::{Result, TransportError, WebhookError};
use crate::logging::Logger;

/// Log a transport failure and fail the invocation
pub fn default_error_handler(error: TransportError, logger: &Logger) -> Result<()> {
    logger.error(format!("Error making request to server: {error}"));
    Err(WebhookError::Transport(error))
}

/// Accept a 200, fail on anything else
pub fn default_response_handler(response: &HttpResponse, logger: &Logger) -> Result<()> {
    if response.is_ok() {
        logger.info("Success.");
        Ok(())
    } else {
        log_failure(response, logger);
        Err(WebhookError::RequestFailed {
            status: response.status,
        })
    }
}

/// Handler for project updates
///
/// A 200 must carry a JSON body; one without a truthy `result.id` is logged
/// and tolerated. A body that is not JSON, or any status other than 200,
/// fails the invocation.
pub fn project_update_response_handler(response: &HttpResponse, logger: &Logger) -> Result<()> {
    if !response.is_ok() {
        log_failure(response, logger);
        return Err(WebhookError::RequestFailed {
            status: response.status,
        });
    }

    let body: Value = serde_json::from_str(&response.body).map_err(|e| {
        logger.error(format!(
            "Project update returned a body that is not JSON. RESPONSE BODY: {}",
            response.body
        ));
        WebhookError::MalformedResponse(e)
    })?;

    if update_acknowledged(&body) {
        logger.info("Successfully updated SPIDAmin project.");
    } else {
        logger.error(format!(
            "Project update returned 200 without an acknowledgment. RESPONSE BODY: {}",
            response.body
        ));
    }
    Ok(())
}

/// Whether an update response carries a `result.id`
///
/// `0`, `false`, `""` and `null` do not count.
#[must_use]
pub fn update_acknowledged(body: &Value) -> bool {
    match body.pointer("/result/id") {
        Some(Value::Number(id)) => id.as_f64().is_some_and(|id| id.abs() > 0.0),
        Some(Value::String(id)) => !id.is_empty(),
        Some(Value::Bool(id)) => *id,
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

fn log_failure(response: &HttpResponse, logger: &Logger) {
    logger.error(format!("STATUS: {}", response.status));
    logger.error(format!("HEADERS: {}", response.headers_json()));
    logger.error(format!("RESPONSE BODY: {}\n", response.body));
}
