//! HTTP request execution
//!
//! - [`request`] - descriptors, handlers and responses
//! - [`transport`] - the wire-level port and its reqwest adapter
//! - [`executor`] - issues one request and dispatches its outcome
//! - [`handlers`] - default response and error handlers

pub mod executor;
pub mod handlers;
pub mod request;
pub mod transport;

pub use executor::HttpExecutor;
pub use handlers::{
    default_error_handler, default_response_handler, project_update_response_handler,
};
pub use request::{
    FORM_CONTENT_TYPE, HttpMethod, HttpResponse, OnError, OnResponse, RequestDescriptor,
    ServerTarget,
};
pub use transport::{OutgoingRequest, ReqwestTransport, Transport};
