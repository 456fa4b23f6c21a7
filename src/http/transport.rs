//! HTTP transport port and its reqwest adapter

use std::future::Future;

use super::request::{HttpMethod, HttpResponse};
use crate::error::TransportError;

/// A request ready to go on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// Method
    pub method: HttpMethod,
    /// Fully-qualified URL
    pub url: String,
    /// Headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Body, written only when present
    pub body: Option<String>,
}

/// Something that can perform one HTTP exchange
///
/// Implementations send the request once and resolve only after the whole
/// response body has been received.
pub trait Transport: Send + Sync {
    /// Perform the exchange
    fn execute(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Transport backed by a `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport around an existing client
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = HttpResponse::collect_headers(response.headers().iter().map(|(name, value)| {
            (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        }));
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
