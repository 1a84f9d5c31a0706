//! Client error types

use http::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, DNS, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Gateway-class failure (502/503/504), worth retrying
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Any other non-success status
    #[error("HTTP status {status}: {message}")]
    Status { status: u16, message: String },

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether a retry with backoff may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Upstream { .. })
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Upstream { status, .. } | ClientError::Status { status, .. } => {
                Some(*status)
            }
            ClientError::NotFound(_) => Some(StatusCode::NOT_FOUND.as_u16()),
            ClientError::Validation(_) => Some(StatusCode::BAD_REQUEST.as_u16()),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Map a non-success status and its body text to an error
    pub fn from_status(status: StatusCode, text: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                ClientError::Upstream {
                    status: status.as_u16(),
                    message: text,
                }
            }
            _ => ClientError::Status {
                status: status.as_u16(),
                message: text,
            },
        }
    }
}

/// Decode a success body, treating an empty body as JSON `null`
pub(crate) fn decode_body<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_statuses_are_retryable() {
        for status in [
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ] {
            let err = ClientError::from_status(status, "down".into());
            assert!(err.is_retryable(), "{status} should be retryable");
            assert_eq!(err.status(), Some(status.as_u16()));
        }
    }

    #[test]
    fn test_other_statuses_are_not_retryable() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::UNAUTHORIZED,
        ] {
            assert!(!ClientError::from_status(status, String::new()).is_retryable());
        }
    }

    #[test]
    fn test_decode_empty_body_as_null() {
        let _: () = decode_body(b"").unwrap();
        let value: serde_json::Value = decode_body(b"  \n").unwrap();
        assert!(value.is_null());
        assert!(matches!(
            decode_body::<Vec<i32>>(b"{oops"),
            Err(ClientError::InvalidResponse(_))
        ));
    }
}
