//! Error type for transport operations.

use std::error::Error;
use std::fmt;

use serde_json::Value;

/// Failure raised by a [`Transport`](super::Transport).
///
/// The `Display` output is the user-facing message: it is what ends up in
/// toasts and in the error panel of a resource list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    Status {
        status: u16,
        reason: String,
        detail: String,
    },
    /// The request never produced a response (connection refused, timeout, ...).
    Network(String),
    /// A 2xx response whose body was expected to be JSON but was not.
    Decode { raw: String },
    /// The request could not be built, e.g. an unparseable content type.
    InvalidRequest(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Status {
                status,
                reason,
                detail,
            } => {
                if reason.is_empty() {
                    write!(f, "{}: {}", status, detail)
                } else {
                    write!(f, "{} {}: {}", status, reason, detail)
                }
            }
            TransportError::Network(msg) => write!(f, "network error: {}", msg),
            TransportError::Decode { raw } => write!(f, "invalid JSON response: {}", raw),
            TransportError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
        }
    }
}

impl Error for TransportError {}

impl TransportError {
    /// Build a status error from a raw response body.
    ///
    /// The detail is the body's `detail` string when present, otherwise the
    /// JSON body itself, otherwise the raw text.
    pub fn from_response(status: u16, reason: impl Into<String>, body: &str) -> Self {
        TransportError::Status {
            status,
            reason: reason.into(),
            detail: detail_from_body(body),
        }
    }

    /// HTTP status of the failure, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-supplied detail, or the underlying message for non-status errors.
    pub fn detail(&self) -> &str {
        match self {
            TransportError::Status { detail, .. } => detail,
            TransportError::Network(msg) => msg,
            TransportError::Decode { raw } => raw,
            TransportError::InvalidRequest(msg) => msg,
        }
    }
}

const FALLBACK_DETAIL: &str = "Request failed";

fn detail_from_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return FALLBACK_DETAIL.to_string();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            let detail = match map.get("detail") {
                Some(Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
                Some(Value::String(_)) | Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            };
            detail.unwrap_or_else(|| Value::Object(map).to_string())
        }
        Ok(Value::Null) => FALLBACK_DETAIL.to_string(),
        Ok(other) => other.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Canonical reason phrase for the statuses the API is known to return.
pub(crate) fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}
