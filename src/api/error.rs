//! API Error Types
//!
//! Client-side taxonomy of everything that can go wrong talking to the
//! clinic API, and how each case turns into user-facing notifications.

use serde::Deserialize;
use thiserror::Error;

use crate::notify::{Notification, CONNECTIVITY_MESSAGE};

/// Errors returned by clinic API calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup endpoint answered 404
    #[error("Not found")]
    NotFound,

    /// No session token available for an authenticated call
    #[error("Not authenticated")]
    Unauthenticated,

    /// Non-2xx answer from the API
    #[error("API error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
        field_errors: Vec<String>,
    },

    /// Transport failure, the API was never reached
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx answer whose body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Error body shape used by the API (`{message, errors}`)
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    /// Field name to messages, in the order the server sent them
    #[serde(default)]
    pub errors: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ApiError {
    /// Build an error from a non-2xx status and its raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let field_errors = parsed
            .errors
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(_, messages)| match messages {
                serde_json::Value::Array(list) => list
                    .into_iter()
                    .find_map(|m| m.as_str().map(str::to_string)),
                serde_json::Value::String(message) => Some(message),
                _ => None,
            })
            .collect();

        ApiError::Server {
            status,
            message: parsed.message.filter(|m| !m.trim().is_empty()),
            field_errors,
        }
    }

    /// Same as [`ApiError::from_response`], but 404 becomes [`ApiError::NotFound`]
    pub fn from_lookup_response(status: u16, body: &str) -> Self {
        if status == 404 {
            ApiError::NotFound
        } else {
            Self::from_response(status, body)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Single notification for this error; `fallback` stands in for a
    /// missing server message
    pub fn notification(&self, fallback: &str) -> Notification {
        match self {
            ApiError::Validation(message) => Notification::error(message.clone()),
            ApiError::Unauthenticated => {
                Notification::error("No hay token de autenticación disponible")
            }
            ApiError::Network(_) => Notification::error(CONNECTIVITY_MESSAGE),
            ApiError::Server {
                message: Some(message),
                ..
            } => Notification::error(format!("Error: {}", message)),
            ApiError::Server { message: None, .. } | ApiError::NotFound | ApiError::Decode(_) => {
                Notification::error(format!("Error: {}", fallback))
            }
        }
    }

    /// One notification per server field error when present, otherwise the
    /// single notification from [`ApiError::notification`]
    pub fn field_notifications(&self, fallback: &str) -> Vec<Notification> {
        match self {
            ApiError::Server { field_errors, .. } if !field_errors.is_empty() => field_errors
                .iter()
                .map(|message| Notification::error(format!("Error: {}", message)))
                .collect(),
            other => vec![other.notification(fallback)],
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_surfaced() {
        let err = ApiError::from_response(401, r#"{"message": "Credenciales inválidas"}"#);
        assert_eq!(
            err.notification("Algo salió mal.").title,
            "Error: Credenciales inválidas"
        );
    }

    #[test]
    fn test_fallback_when_body_is_not_json() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(err.notification("Algo salió mal.").title, "Error: Algo salió mal.");
    }

    #[test]
    fn test_lookup_404_is_distinct() {
        assert!(ApiError::from_lookup_response(404, "").is_not_found());
        assert!(!ApiError::from_response(404, "").is_not_found());
    }

    #[test]
    fn test_field_errors_take_first_message_per_field() {
        let body = r#"{
            "message": "The given data was invalid.",
            "errors": {
                "email": ["The email has already been taken.", "ignored"],
                "password": ["The password must be at least 8 characters."]
            }
        }"#;
        let notifications = ApiError::from_response(422, body).field_notifications("x");
        let titles: Vec<_> = notifications.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Error: The email has already been taken.",
                "Error: The password must be at least 8 characters.",
            ]
        );
    }

    #[test]
    fn test_field_errors_keep_server_order() {
        let body = r#"{
            "errors": {
                "password": ["La contraseña es muy corta."],
                "email": ["El email ya está registrado."],
                "dni": ["El DNI ya está registrado."]
            }
        }"#;
        let notifications = ApiError::from_response(422, body).field_notifications("x");
        let titles: Vec<_> = notifications.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Error: La contraseña es muy corta.",
                "Error: El email ya está registrado.",
                "Error: El DNI ya está registrado.",
            ]
        );
    }

    #[test]
    fn test_network_error_uses_connectivity_message() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.notification("x").title, CONNECTIVITY_MESSAGE);
        assert_eq!(err.field_notifications("x").len(), 1);
    }
}
