//! API error types with HTTP response mapping.

use application::{ApplicationError, MappingError};
use axum::http::StatusCode;
use persistence::PersistenceError;
use axum::response::{IntoResponse, Response};

/// API-level error type that maps to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Bad request from the client.
    #[error("{0}")]
    BadRequest(String),
    /// A use case failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Application(err) => application_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn application_error_to_response(err: ApplicationError) -> (StatusCode, String) {
    match &err {
        ApplicationError::Precondition(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ApplicationError::Domain(_) | ApplicationError::Mapping(MappingError::Domain(_)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        ApplicationError::Mapping(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ApplicationError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
        // Lost race against a concurrent insert of the same key.
        ApplicationError::Persistence(
            PersistenceError::DuplicateKey { .. } | PersistenceError::UniqueViolation { .. },
        ) => (StatusCode::CONFLICT, err.to_string()),
        ApplicationError::Persistence(_) | ApplicationError::EventDispatch(_) => {
            tracing::error!(error = %err, "internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}
