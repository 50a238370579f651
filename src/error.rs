//! Error types for the GoCardless client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! [`ApiError`] is the structured error object the API returns under the
//! `error` key. It can arrive either inside a non-2xx response or, less
//! obviously, inside an HTTP 200 body.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Request Construction Errors
    // ============================================================================
    #[error("Failed to encode request: {message}")]
    Encode { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: u16,
        body: String,
        api_error: Option<ApiError>,
    },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("API error: {0}")]
    Api(ApiError),

    #[error("Missing result: response had neither `error` nor `{key}`")]
    MissingResult { key: String },

    /// Malformed or unexpected 2xx body. Like `MissingResult`, never retried.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an HTTP status error, parsing a structured API error from the
    /// body when it has one
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let api_error = ApiError::from_body(&body);
        Self::HttpStatus {
            status,
            body,
            api_error,
        }
    }

    /// Create a missing result error
    pub fn missing_result(key: impl Into<String>) -> Self {
        Self::MissingResult { key: key.into() }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Transport failures and error statuses are retried. Errors decoded from
    /// a successful response are definitive and are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => !e.is_builder(),
            Error::Transport { .. } | Error::HttpStatus { .. } => true,
            _ => false,
        }
    }

    /// The structured API error carried by this error, if any
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            Error::HttpStatus { api_error, .. } => api_error.as_ref(),
            _ => None,
        }
    }
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// API Error
// ============================================================================

/// Structured error returned by the API under the `error` key
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiError {
    /// Error kind, e.g. `invalid_api_usage` or `validation_failed`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Numeric code mirroring the HTTP status the API would use
    #[serde(default)]
    pub code: u16,
    /// Human readable message
    #[serde(default)]
    pub message: String,
    /// Link to the documentation for this error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    /// Request id for correlating with the API provider's logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Field-level validation errors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// A single field-level error inside an [`ApiError`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_pointer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApiError {
    /// Parse `{"error": {...}}` out of a raw response body
    pub fn from_body(body: &str) -> Option<Self> {
        #[derive(Deserialize)]
        struct Wrapper {
            error: ApiError,
        }

        serde_json::from_str::<Wrapper>(body).ok().map(|w| w.error)
    }

}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.code, self.message)?;
        for err in &self.errors {
            match &err.field {
                Some(field) => write!(f, "; {field} {}", err.message)?,
                None => write!(f, "; {}", err.message)?,
            }
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " [request_id: {request_id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("access_token");
        assert_eq!(
            err.to_string(),
            "Missing required config field: access_token"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::missing_result("blocks");
        assert!(err.to_string().contains("`blocks`"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::transport("connection refused").is_retryable());
        assert!(Error::http_status(500, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());
        assert!(Error::http_status(422, "").is_retryable());

        assert!(!Error::Api(ApiError::default()).is_retryable());
        assert!(!Error::missing_result("webhooks").is_retryable());
        assert!(!Error::decode("bad json").is_retryable());
        assert!(!Error::config("test").is_retryable());
    }

    #[test]
    fn test_http_status_parses_api_error() {
        let body = r#"{"error":{"type":"invalid_state","code":422,"message":"Block already disabled","request_id":"req_1"}}"#;
        let err = Error::http_status(422, body);

        let api = err.api_error().expect("structured error");
        assert_eq!(api.kind, "invalid_state");
        assert_eq!(api.code, 422);
        assert_eq!(api.request_id.as_deref(), Some("req_1"));
    }

    #[test]
    fn test_http_status_plain_body() {
        let err = Error::http_status(502, "Bad Gateway");
        assert!(err.api_error().is_none());
    }

    #[test]
    fn test_api_error_display_with_fields() {
        let api = ApiError {
            kind: "validation_failed".to_string(),
            code: 422,
            message: "Validation failed".to_string(),
            documentation_url: None,
            request_id: Some("req_2".to_string()),
            errors: vec![FieldError {
                field: Some("reason_type".to_string()),
                message: "is invalid".to_string(),
                request_pointer: Some("/blocks/reason_type".to_string()),
                reason: None,
            }],
        };

        assert_eq!(
            api.to_string(),
            "validation_failed (422): Validation failed; reason_type is invalid [request_id: req_2]"
        );
    }
}
