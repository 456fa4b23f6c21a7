//! Single-shot HTTP request executor

use super::handlers::{default_error_handler, default_response_handler};
use super::request::RequestDescriptor;
use super::transport::{OutgoingRequest, Transport};
use crate::error::Result;
use crate::logging::Logger;

/// Issues requests described by [`RequestDescriptor`]s
#[derive(Debug)]
pub struct HttpExecutor<'a, T> {
    transport: &'a T,
    logger: &'a Logger,
}

impl<'a, T: Transport> HttpExecutor<'a, T> {
    /// Create an executor over a transport
    #[must_use]
    pub const fn new(transport: &'a T, logger: &'a Logger) -> Self {
        Self { transport, logger }
    }

    /// The logger this executor reports through
    #[must_use]
    pub const fn logger(&self) -> &'a Logger {
        self.logger
    }

    /// Send one request and dispatch its outcome
    ///
    /// The response handler runs after the whole body has been received.
    /// Without custom handlers, a non-200 status or a transport failure is
    /// returned as an error.
    pub async fn send_request(&self, descriptor: RequestDescriptor<'_>) -> Result<()> {
        let url = descriptor.url();
        self.logger.info(format!("HTTP {} request to {url}", descriptor.method));
        self.logger.debug(format!("request headers: {:?}", descriptor.headers));

        let RequestDescriptor {
            method,
            headers,
            body,
            on_response,
            on_error,
            ..
        } = descriptor;

        let request = OutgoingRequest {
            method,
            url,
            headers,
            body,
        };

        match self.transport.execute(request).await {
            Ok(response) => {
                self.logger.debug(format!("STATUS: {}", response.status));
                self.logger.debug(format!("HEADERS: {}", response.headers_json()));
                self.logger.debug(format!("RESPONSE BODY: {}\n", response.body));
                on_response.or_default(default_response_handler)(&response, self.logger)
            },
            Err(error) => on_error.or_default(default_error_handler)(error, self.logger),
        }
    }
}
