//! Data models for SPIDAmin project updates
//!
//! Core abstractions:
//! - DataForm: a titled set of key/value fields attached to a project
//! - ProjectPatch: a partial project document sent back to the server
//! - LogMessage: an entry appended to a project's log history

pub mod data_form;
pub mod log_message;
pub mod project;

pub use data_form::DataForm;
pub use log_message::LogMessage;
pub use project::{ProjectCode, ProjectPatch, ProjectStatus};
