//! Leveled logger
//!
//! A [`Logger`] carries its own [`LogLevel`] and is passed by reference to
//! every component that logs. It gates three channels (error, info, debug):
//! a message is emitted only when the current level ranks at or above the
//! channel.
//!
//! Emission goes through a [`LogSink`]. The default [`FacadeSink`] forwards
//! to the `log` crate, so the binary decides where records end up.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Logging verbosity, ordered `none < error < info < debug`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Suppress everything
    None,
    /// Errors only
    Error,
    /// Errors and informational messages
    #[default]
    Info,
    /// Everything, including request/response dumps
    Debug,
}

impl LogLevel {
    /// Numeric rank of this level
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Error => 1,
            Self::Info => 2,
            Self::Debug => 3,
        }
    }

    /// Parse an exact lowercase level name, treating anything else as
    /// [`LogLevel::None`]
    ///
    /// Used for `scriptParam.logLevel`, where `"DEBUG"` or `"debug "` are
    /// unrecognized. The [`FromStr`](std::str::FromStr) impl is the forgiving
    /// parser for command-line input.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "error" => Self::Error,
            "info" => Self::Info,
            "debug" => Self::Debug,
            _ => Self::None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Invalid log level: {s}. Use: none, error, info, debug")),
        }
    }
}

/// One of the three logging channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Failures
    Error,
    /// Progress and diagnostics
    Info,
    /// Verbose dumps
    Debug,
}

impl Channel {
    /// Minimum level at which this channel is emitted
    #[must_use]
    pub const fn threshold(self) -> LogLevel {
        match self {
            Self::Error => LogLevel::Error,
            Self::Info => LogLevel::Info,
            Self::Debug => LogLevel::Debug,
        }
    }
}

/// Destination for messages that passed the level gate
pub trait LogSink: Send + Sync {
    /// Write one message on the given channel
    fn emit(&self, channel: Channel, message: &str);
}

/// Sink that forwards to the `log` crate facade
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn emit(&self, channel: Channel, message: &str) {
        match channel {
            Channel::Error => log::error!("{message}"),
            Channel::Info => log::info!("{message}"),
            Channel::Debug => log::debug!("{message}"),
        }
    }
}

/// Level-gated logger handed to every component
#[derive(Clone)]
pub struct Logger {
    level: LogLevel,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Create a logger that forwards to the `log` facade
    #[must_use]
    pub fn new(level: LogLevel) -> Self {
        Self::with_sink(level, Arc::new(FacadeSink))
    }

    /// Create a logger writing to a custom sink
    #[must_use]
    pub fn with_sink(level: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        Self { level, sink }
    }

    /// Current level
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Replace the current level
    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// Whether a message on `channel` would be emitted
    #[must_use]
    pub fn enabled(&self, channel: Channel) -> bool {
        self.level.rank() >= channel.threshold().rank()
    }

    /// Log on the error channel
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Channel::Error, message);
    }

    /// Log on the info channel
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Channel::Info, message);
    }

    /// Log on the debug channel
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Channel::Debug, message);
    }

    fn log(&self, channel: Channel, message: impl fmt::Display) {
        if self.enabled(channel) {
            self.sink.emit(channel, &message.to_string());
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("level", &self.level).finish_non_exhaustive()
    }
}
