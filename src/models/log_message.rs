//! Project log message model

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// An entry for a project's log history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    /// What caused the message (usually the webhook's event name)
    pub trigger: String,

    /// Message text
    pub message: String,

    /// Whether the triggering action succeeded
    pub success: bool,

    /// Milliseconds since the Unix epoch
    pub date: i64,
}

impl LogMessage {
    /// Create a log message stamped with the current time
    #[must_use]
    pub fn new(trigger: impl Into<String>, message: impl Into<String>, success: bool) -> Self {
        Self {
            trigger: trigger.into(),
            message: message.into(),
            success,
            date: Utc::now().timestamp_millis(),
        }
    }
}
