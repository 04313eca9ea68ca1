//! Provider error types

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the auth and data clients
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An error reported by the provider itself; displays its message verbatim
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from provider: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not signed in")]
    NotAuthenticated,
}

impl ProviderError {
    /// Build an `Api` error from a non-success response body.
    ///
    /// GoTrue and PostgREST use different shapes for error bodies, so the
    /// first field present out of `error_description`, `msg`, `message` and
    /// `error` wins. Non-JSON bodies are used as-is.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = decode_error_message(body)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        Self::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn decode_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gotrue_error_description() {
        let err = ProviderError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(matches!(err, ProviderError::Api { status: 400, .. }));
    }

    #[test]
    fn test_gotrue_msg_field() {
        let err = ProviderError::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"code":422,"msg":"User already registered"}"#,
        );
        assert_eq!(err.to_string(), "User already registered");
    }

    #[test]
    fn test_postgrest_message() {
        let err = ProviderError::from_response(
            StatusCode::FORBIDDEN,
            r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"topics\""}"#,
        );
        assert_eq!(
            err.to_string(),
            "new row violates row-level security policy for table \"topics\""
        );
    }

    #[test]
    fn test_plain_and_empty_bodies() {
        let err = ProviderError::from_response(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.to_string(), "upstream down");

        let err = ProviderError::from_response(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.to_string(), "Service Unavailable");
    }
}
