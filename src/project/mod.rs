//! Project update client
//!
//! Convenience operations for reading and updating a SPIDAmin project, plus
//! data form lookup on a fetched project document.

pub mod client;
pub mod forms;

pub use client::{ADD_LOG_MESSAGE_PATH, CREATE_OR_UPDATE_PATH, GET_PROJECTS_PATH, ProjectClient};
pub use forms::{find_form, find_form_field_value};
