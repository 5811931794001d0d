//! Classified backend errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error category for a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Connection failure, timeout, or a request that never got a response.
    Network,
    /// 401/403, or a rejected session token.
    Unauthorized,
    /// Any other 4xx (malformed or rejected input).
    Validation,
    /// 404 (e.g. deleting an id the backend no longer has).
    NotFound,
    /// 5xx, undecodable bodies, anything else.
    Unknown,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::Validation => write!(f, "validation"),
            ApiErrorKind::NotFound => write!(f, "not_found"),
            ApiErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Structured error from the backend with kind and details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an error from a non-success HTTP status and its body.
    pub fn http_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            400..=499 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Unknown,
        };
        let message = match extract_body_message(body) {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };
        let details = (!body.is_empty()).then(|| body.to_string());
        Self {
            kind,
            message,
            details,
        }
    }

    /// Creates an error for a response body that could not be decoded.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::new(ApiErrorKind::Network, format!("Request timed out: {e}"))
        } else if e.is_connect() {
            ApiError::new(ApiErrorKind::Network, format!("Connection failed: {e}"))
        } else if e.is_decode() {
            ApiError::decode(format!("Failed to decode response: {e}"))
        } else if let Some(status) = e.status() {
            ApiError::http_status(status.as_u16(), "")
        } else {
            ApiError::new(ApiErrorKind::Network, format!("Network error: {e}"))
        }
    }
}

/// Result type for backend operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Pulls a human-readable message out of a JSON error body.
///
/// Accepts `{"error": "..."}`, `{"error": {"message": "..."}}`, `{"message": "..."}`
/// and `{"msg": "..."}`.
fn extract_body_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let candidate = match json.get("error") {
        Some(Value::String(msg)) => Some(msg.as_str()),
        Some(obj) => obj.get("message").and_then(Value::as_str),
        None => None,
    };
    candidate
        .or_else(|| json.get("message").and_then(Value::as_str))
        .or_else(|| json.get("msg").and_then(Value::as_str))
        .map(str::trim)
        .filter(|msg| !msg.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiError::http_status(401, "").kind, ApiErrorKind::Unauthorized);
        assert_eq!(ApiError::http_status(403, "").kind, ApiErrorKind::Unauthorized);
        assert_eq!(ApiError::http_status(404, "").kind, ApiErrorKind::NotFound);
        assert_eq!(ApiError::http_status(400, "").kind, ApiErrorKind::Validation);
        assert_eq!(ApiError::http_status(422, "").kind, ApiErrorKind::Validation);
        assert_eq!(ApiError::http_status(500, "").kind, ApiErrorKind::Unknown);
        assert_eq!(ApiError::http_status(302, "").kind, ApiErrorKind::Unknown);
    }

    #[test]
    fn test_message_from_json_body() {
        let err = ApiError::http_status(401, r#"{"status":"Error","msg":"Unauthorized"}"#);
        assert_eq!(err.message, "HTTP 401: Unauthorized");
        assert!(err.details.is_some());

        let err = ApiError::http_status(400, r#"{"error":{"message":"title required"}}"#);
        assert_eq!(err.message, "HTTP 400: title required");

        let err = ApiError::http_status(400, r#"{"error":"bad email"}"#);
        assert_eq!(err.message, "HTTP 400: bad email");
    }

    #[test]
    fn test_message_without_json_body() {
        let err = ApiError::http_status(502, "<html>bad gateway</html>");
        assert_eq!(err.message, "HTTP 502");
        assert_eq!(err.details.as_deref(), Some("<html>bad gateway</html>"));

        let err = ApiError::http_status(404, "");
        assert_eq!(err.message, "HTTP 404");
        assert!(err.details.is_none());
        assert!(err.is_not_found());
    }
}
