//! API error taxonomy.

use serde_json::Value;
use thiserror::Error;

/// Error raised by any REST call.
///
/// Transport failures (DNS, refused connection, timeouts) are `Network`;
/// a completed request with a non-2xx status is `Status`, carrying the
/// HTTP status as a string `code` plus whatever the body offered.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {code}: {message}")]
    Status {
        /// HTTP status code as a string (e.g. `"404"`).
        code: String,
        /// Best-effort message from the body's `message` key.
        message: String,
        /// Parsed response body, `{}` when the body was not JSON.
        details: Value,
    },
}

impl ApiError {
    /// Build a `Status` error from a status code and raw body text.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let details: Value = serde_json::from_str(body).unwrap_or_else(|_| Value::Object(
            serde_json::Map::new(),
        ));
        let message = details
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP error {status}"), ToString::to_string);
        ApiError::Status {
            code: status.to_string(),
            message,
            details,
        }
    }

    /// Whether this is an HTTP 401 response.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { code, .. } if code == "401")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_status_with_json_body() {
        let err = ApiError::from_status(404, r#"{"message": "Document not found"}"#);
        match err {
            ApiError::Status {
                code,
                message,
                details,
            } => {
                assert_eq!(code, "404");
                assert_eq!(message, "Document not found");
                assert_eq!(details.get("message"), Some(&json!("Document not found")));
            }
            ApiError::Network(_) => panic!("expected status error"),
        }
    }

    #[test]
    fn test_from_status_with_non_json_body() {
        let err = ApiError::from_status(500, "<html>oops</html>");
        match err {
            ApiError::Status {
                code,
                message,
                details,
            } => {
                assert_eq!(code, "500");
                assert_eq!(message, "HTTP error 500");
                assert_eq!(details, json!({}));
            }
            ApiError::Network(_) => panic!("expected status error"),
        }
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(!ApiError::from_status(403, "").is_unauthorized());
    }
}
