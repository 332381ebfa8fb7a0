//! Error types for request dispatch.
//!
//! Every failure the core can produce lands in [`Error`]. Encoding problems are raised
//! before any network I/O, transport problems while talking to the server, and status
//! or schema problems after a response has been received.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for request dispatch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A caller-supplied argument could not be serialized.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Connection-level failure while sending or receiving.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting for the server.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with an error status.
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: StatusCode,
        /// Raw response body
        body: String,
        /// Structured error payload, when the body could be parsed
        detail: Option<ApiErrorDetail>,
    },

    /// A successful response did not match the declared result shape.
    #[error("Response failed schema validation at `{path}`: {message}")]
    SchemaValidation {
        /// Path of the first mismatch (`$` is the document root)
        path: String,
        /// Description of the mismatch
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid endpoint or base URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for request dispatch.
pub type Result<T> = std::result::Result<T, Error>;

/// Structured error payload returned by the API on failure.
///
/// All fields are optional: servers disagree on the exact shape, and the raw body is
/// always kept alongside in [`Error::Api`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorDetail {
    /// Human-readable error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Server-declared error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorDetail {
    /// Parse an error body, returning `None` for non-JSON or non-object payloads.
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        if !value.is_object() {
            return None;
        }
        let mut detail: Self = serde_json::from_value(value.clone()).ok()?;
        if detail.message.is_none() {
            detail.message = value
                .get("detail")
                .or_else(|| value.get("error"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string);
        }
        if detail.details.is_none() {
            detail.details = Some(value);
        }
        Some(detail)
    }
}

impl Error {
    /// Build an [`Error::Api`] from a status code and raw body.
    #[must_use]
    pub fn api(status: StatusCode, body: &[u8]) -> Self {
        Self::Api {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            detail: ApiErrorDetail::parse(body),
        }
    }

    /// Build an [`Error::SchemaValidation`].
    #[must_use]
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Encoding(_) => "ENCODING_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Api { .. } => "API_ERROR",
            Self::SchemaValidation { .. } => "SCHEMA_VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// HTTP status of an [`Error::Api`].
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for connection-level failures, timeouts included.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Returns true if the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns true if the server rejected the credentials.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_builder() {
            // The request itself could not be built from its parts.
            Self::Encoding(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Encoding("x".into()).error_code(), "ENCODING_ERROR");
        assert_eq!(Error::Transport("x".into()).error_code(), "TRANSPORT_ERROR");
        assert_eq!(Error::Timeout("x".into()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::api(StatusCode::BAD_REQUEST, b"bad").error_code(),
            "API_ERROR"
        );
        assert_eq!(
            Error::schema("$.id", "missing field").error_code(),
            "SCHEMA_VALIDATION_ERROR"
        );
        assert_eq!(Error::Config("x".into()).error_code(), "CONFIG_ERROR");
        assert_eq!(
            Error::InvalidEndpoint("x".into()).error_code(),
            "INVALID_ENDPOINT"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::schema("$.results[0].id", "invalid type: integer `3`");
        assert_eq!(
            err.to_string(),
            "Response failed schema validation at `$.results[0].id`: invalid type: integer `3`"
        );

        let err = Error::api(StatusCode::NOT_FOUND, b"missing");
        assert_eq!(err.to_string(), "API error 404 Not Found: missing");
    }

    #[test]
    fn test_timeout_is_transport() {
        assert!(Error::Timeout("slow".into()).is_transport());
        assert!(Error::Transport("reset".into()).is_transport());
        assert!(!Error::Encoding("bad".into()).is_transport());
    }

    #[test]
    fn test_api_error_parses_json_detail() {
        let err = Error::api(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"message": "slug taken", "code": "conflict"}"#,
        );
        let Error::Api { detail, body, .. } = &err else {
            panic!("expected api error");
        };
        let detail = detail.as_ref().unwrap();
        assert_eq!(detail.message.as_deref(), Some("slug taken"));
        assert_eq!(detail.code.as_deref(), Some("conflict"));
        assert!(body.contains("slug taken"));
    }

    #[test]
    fn test_api_error_falls_back_to_detail_key() {
        let detail = ApiErrorDetail::parse(br#"{"detail": "Not authenticated"}"#).unwrap();
        assert_eq!(detail.message.as_deref(), Some("Not authenticated"));
    }

    #[test]
    fn test_api_error_keeps_opaque_text() {
        let err = Error::api(StatusCode::BAD_GATEWAY, b"<html>upstream</html>");
        let Error::Api { detail, body, .. } = err else {
            panic!("expected api error");
        };
        assert!(detail.is_none());
        assert_eq!(body, "<html>upstream</html>");
    }

    #[test]
    fn test_status_helpers() {
        assert!(Error::api(StatusCode::NOT_FOUND, b"").is_not_found());
        assert!(Error::api(StatusCode::UNAUTHORIZED, b"").is_auth_failure());
        assert!(Error::api(StatusCode::FORBIDDEN, b"").is_auth_failure());
        assert!(!Error::Timeout("x".into()).is_not_found());
        assert_eq!(Error::Config("x".into()).status(), None);
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }
}
