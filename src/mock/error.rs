//! Mock API Error Types
//!
//! Errors answered by the mock API, serialized in the same
//! `{message, errors}` shape the real API uses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MockError {
    /// Per-field validation failure (422)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },

    /// Bad credentials or missing/unknown bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role may not do this
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl MockError {
    /// Single-field validation error
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![message.clone()]);
        MockError::Validation { message, errors }
    }

    fn message(&self) -> &str {
        match self {
            MockError::Validation { message, .. } => message,
            MockError::Unauthorized(m)
            | MockError::Forbidden(m)
            | MockError::NotFound(m)
            | MockError::BadRequest(m) => m,
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    pub request_id: String,
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            MockError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            MockError::Forbidden(_) => StatusCode::FORBIDDEN,
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::warn!(
            request_id = %request_id,
            status = status.as_u16(),
            error_message = %self,
            "Mock API error"
        );

        let message = self.message().to_string();
        let errors = match self {
            MockError::Validation { errors, .. } => Some(errors),
            _ => None,
        };

        let body = ErrorResponse {
            message,
            errors,
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

pub type MockResult<T> = Result<T, MockError>;
