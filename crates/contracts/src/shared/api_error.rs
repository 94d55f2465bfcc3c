//! Единый тип ошибки для всех обращений к ERP API.
//!
//! Transport-class errors (network, HTTP status, undecodable payload) and
//! application-class errors (the server answered but flagged a failure in the
//! envelope) share one enum so every caller handles them the same way.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("server responded with status {status}")]
    Http { status: u16 },

    #[error("{message}")]
    Application { message: String },

    #[error("unexpected response format: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    /// Network / status / format failures, as opposed to errors reported by the server itself.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Application { .. })
    }

    /// Текст для snackbar-уведомления
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the server. Check your connection.".to_string(),
            Self::Http { status } if *status == 401 || *status == 403 => {
                "Your session has expired or you lack access to this data.".to_string()
            }
            Self::Http { status } => format!("Server error ({status}). Please try again."),
            Self::Application { message } => message.clone(),
            Self::Decode(_) => "The server returned data in an unexpected format.".to_string(),
        }
    }
}

/// Checks a decoded response body for an application-level failure flag.
///
/// Recognised shapes:
/// - `{"success": false, "message": "..."}`
/// - `{"status": "error", "message": "..."}`
/// - `{"error": true, "message": "..."}` or `{"error": "..."}`
pub fn check_envelope(body: &Value) -> Result<(), ApiError> {
    let failed = matches!(body.get("success"), Some(Value::Bool(false)))
        || body
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|s| s.eq_ignore_ascii_case("error"))
        || match body.get("error") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(s)) => !s.is_empty(),
            _ => false,
        };

    if !failed {
        return Ok(());
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or("The request was rejected by the server")
        .to_string();

    Err(ApiError::Application { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_success_bodies_pass() {
        assert!(check_envelope(&json!({"data": []})).is_ok());
        assert!(check_envelope(&json!({"success": true, "data": {}})).is_ok());
        assert!(check_envelope(&json!({"status": "success"})).is_ok());
        assert!(check_envelope(&json!({"error": false})).is_ok());
        assert!(check_envelope(&json!({"error": ""})).is_ok());
    }

    #[test]
    fn error_flags_become_application_errors() {
        assert_eq!(
            check_envelope(&json!({"success": false, "message": "Invalid salesman"})),
            Err(ApiError::application("Invalid salesman"))
        );
        assert_eq!(
            check_envelope(&json!({"status": "ERROR", "message": "Out of range"})),
            Err(ApiError::application("Out of range"))
        );
        assert_eq!(
            check_envelope(&json!({"error": "Filter not supported"})),
            Err(ApiError::application("Filter not supported"))
        );
    }

    #[test]
    fn missing_message_gets_generic_text() {
        let err = check_envelope(&json!({"error": true})).unwrap_err();
        assert_eq!(
            err,
            ApiError::application("The request was rejected by the server")
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn transport_classification() {
        assert!(ApiError::transport("connection refused").is_transport());
        assert!(ApiError::Http { status: 500 }.is_transport());
        assert!(ApiError::decode("missing field").is_transport());
    }
}
