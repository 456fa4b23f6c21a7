//! Request descriptors and responses
//!
//! A [`RequestDescriptor`] is an immutable description of one HTTP call:
//! where it goes, what it carries, and how its outcome is handled. It is
//! built per call and consumed by [`HttpExecutor::send_request`].
//!
//! [`HttpExecutor::send_request`]: super::HttpExecutor::send_request

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::error::{Result, TransportError, WebhookError};
use crate::logging::Logger;

/// Form-encoded body content type
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP methods the helper issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
        }
    }
}

/// Scheme, host and port of the remote server
///
/// Any path on the configured base URL is ignored; request paths are always
/// absolute from the server root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTarget {
    /// URL scheme without the trailing colon (`http`, `https`)
    pub protocol: String,
    /// Host name or address
    pub hostname: String,
    /// Port, explicit or the scheme's default
    pub port: u16,
}

impl ServerTarget {
    /// Parse a base URL such as `http://localhost:8888/`
    pub fn parse(base_url: &str) -> Result<Self> {
        let invalid = |reason: String| WebhookError::InvalidServerUrl {
            url: base_url.to_string(),
            reason,
        };

        let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        let hostname = url.host_str().ok_or_else(|| invalid("no host".to_string()))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("no port and no default for scheme".to_string()))?;

        Ok(Self {
            protocol: url.scheme().to_string(),
            hostname: hostname.to_string(),
            port,
        })
    }
}

/// A fully received HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response headers, lowercase names; repeated headers joined with `, `
    pub headers: BTreeMap<String, String>,
    /// Entire body decoded as UTF-8
    pub body: String,
}

impl HttpResponse {
    /// Whether the server answered 200
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Collect header pairs, joining the values of repeated names
    #[must_use]
    pub fn collect_headers<I>(pairs: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut headers = BTreeMap::new();
        for (name, value) in pairs {
            headers
                .entry(name)
                .and_modify(|joined: &mut String| {
                    joined.push_str(", ");
                    joined.push_str(&value);
                })
                .or_insert_with(|| value.clone());
        }
        headers
    }

    /// Headers rendered as a JSON object for diagnostics
    #[must_use]
    pub fn headers_json(&self) -> String {
        serde_json::to_string(&self.headers).unwrap_or_default()
    }
}

/// Callback run once the full response body has arrived
pub type ResponseCallback<'h> =
    Box<dyn FnOnce(&HttpResponse, &Logger) -> Result<()> + Send + 'h>;

/// Callback run when no response could be obtained
pub type ErrorCallback<'h> = Box<dyn FnOnce(TransportError, &Logger) -> Result<()> + Send + 'h>;

/// How a response is handled
pub enum OnResponse<'h> {
    /// Use the caller's fallback handler
    UseDefault,
    /// Use this handler
    Handler(ResponseCallback<'h>),
}

impl<'h> OnResponse<'h> {
    /// Wrap a closure as a response handler
    pub fn handler<F>(f: F) -> Self
    where
        F: FnOnce(&HttpResponse, &Logger) -> Result<()> + Send + 'h,
    {
        Self::Handler(Box::new(f))
    }

    /// Resolve `UseDefault` to the given fallback
    #[must_use]
    pub fn or_default(self, fallback: fn(&HttpResponse, &Logger) -> Result<()>) -> ResponseCallback<'h> {
        match self {
            Self::UseDefault => Box::new(fallback),
            Self::Handler(handler) => handler,
        }
    }

    /// Whether a custom handler was supplied
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::UseDefault)
    }
}

impl fmt::Debug for OnResponse<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseDefault => write!(f, "UseDefault"),
            Self::Handler(_) => write!(f, "Handler(..)"),
        }
    }
}

/// How a transport failure is handled
pub enum OnError<'h> {
    /// Log and fail the invocation
    UseDefault,
    /// Use this handler; returning `Ok` recovers
    Handler(ErrorCallback<'h>),
}

impl<'h> OnError<'h> {
    /// Wrap a closure as an error handler
    pub fn handler<F>(f: F) -> Self
    where
        F: FnOnce(TransportError, &Logger) -> Result<()> + Send + 'h,
    {
        Self::Handler(Box::new(f))
    }

    /// Resolve `UseDefault` to the given fallback
    #[must_use]
    pub fn or_default(self, fallback: fn(TransportError, &Logger) -> Result<()>) -> ErrorCallback<'h> {
        match self {
            Self::UseDefault => Box::new(fallback),
            Self::Handler(handler) => handler,
        }
    }
}

impl fmt::Debug for OnError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UseDefault => write!(f, "UseDefault"),
            Self::Handler(_) => write!(f, "Handler(..)"),
        }
    }
}

/// Description of one HTTP call
#[derive(Debug)]
pub struct RequestDescriptor<'h> {
    /// URL scheme without the trailing colon
    pub protocol: String,
    /// Host name or address
    pub hostname: String,
    /// Port
    pub port: u16,
    /// Absolute path including any query string
    pub path: String,
    /// Method
    pub method: HttpMethod,
    /// Request headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Body written before the request is finalized
    pub body: Option<String>,
    /// Response handling
    pub on_response: OnResponse<'h>,
    /// Transport failure handling
    pub on_error: OnError<'h>,
}

impl<'h> RequestDescriptor<'h> {
    /// A bodiless request against `target` with default handlers
    #[must_use]
    pub fn new(target: &ServerTarget, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            protocol: target.protocol.clone(),
            hostname: target.hostname.clone(),
            port: target.port,
            path: path.into(),
            method,
            headers: Vec::new(),
            body: None,
            on_response: OnResponse::UseDefault,
            on_error: OnError::UseDefault,
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a form-urlencoded body with matching `Content-Type` and
    /// `Content-Length` headers
    #[must_use]
    pub fn with_form_body(self, body: String) -> Self {
        let length = body.len();
        let mut descriptor = self
            .with_header("Content-Type", FORM_CONTENT_TYPE)
            .with_header("Content-Length", length.to_string());
        descriptor.body = Some(body);
        descriptor
    }

    /// Set the response handler
    #[must_use]
    pub fn with_on_response(mut self, on_response: OnResponse<'h>) -> Self {
        self.on_response = on_response;
        self
    }

    /// Set the transport error handler
    #[must_use]
    pub fn with_on_error(mut self, on_error: OnError<'h>) -> Self {
        self.on_error = on_error;
        self
    }

    /// Fully-qualified URL: `protocol://hostname:port/path`
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}:{}{}", self.protocol, self.hostname, self.port, self.path)
    }

    /// Look up a header value (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
