//! Transport - the seam between the dashboard core and the content API.
//!
//! Everything above this module talks to the API through the [`Transport`]
//! trait: a request goes in, a parsed JSON body or a [`TransportError`]
//! comes out. Two implementations ship with the crate:
//!
//! - [`InMemoryApi`] - the endpoint table served from memory, for tests and
//!   offline development.
//! - `HttpTransport` - reqwest against a configured base address (requires
//!   the `http` feature).
//!
//! ## Example
//!
//! ```ignore
//! use comforters_admin::{ApiRequest, InMemoryApi, Transport};
//!
//! let api = InMemoryApi::new();
//! let body = api.send(ApiRequest::get("/devotions")).await?;
//! assert!(body.is_array());
//! ```

mod error;
mod in_memory;

#[cfg(feature = "http")]
mod http;

use std::fmt;
use std::future::Future;

use serde_json::Value;

pub use error::TransportError;
pub(crate) use error::reason_phrase;
pub use in_memory::InMemoryApi;

#[cfg(feature = "http")]
pub use http::HttpTransport;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Request payload. Create endpoints take multipart forms, everything else
/// sends no body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Multipart text fields, in order.
    Form(Vec<(String, String)>),
    /// Multipart with a single file part.
    File(FilePart),
}

impl RequestBody {
    /// Look up a text field of a form body.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            RequestBody::Form(fields) => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

/// A request relative to the API base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path and optional query string, e.g. `/posts?page=2`.
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Performs requests against the content API.
///
/// Implementations must map any non-2xx response to
/// [`TransportError::Status`] and parse 2xx bodies as JSON. An empty 2xx body
/// (as returned by deletes) parses to `Value::Null`.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// Parse a successful response body.
pub(crate) fn parse_success_body(body: &str) -> Result<Value, TransportError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|_| TransportError::Decode {
        raw: body.to_string(),
    })
}
