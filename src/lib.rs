//! spida-webhook - helper library for SPIDAmin webhook scripts
//!
//! A webhook invocation reads one JSON payload from stdin, optionally fetches
//! the project that triggered it, and relays status, log, form or code
//! updates back to the SPIDAmin server. Each invocation issues at most one
//! fetch and one update, then exits.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod http;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod project;

pub use error::{Result, TransportError, WebhookError};
pub use input::{WebhookPayload, read_payload, read_stdin_payload};
pub use logging::{LogLevel, Logger};
pub use project::ProjectClient;
