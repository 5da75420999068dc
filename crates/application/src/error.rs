use domain::{DispatchError, DomainError};
use persistence::PersistenceError;
use thiserror::Error;

/// A source value that cannot be represented in the target shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A field the target requires is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field holds a value the target type cannot accept.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// The target value object or aggregate rejected the data.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl MappingError {
    pub fn invalid(field: &'static str, message: impl std::fmt::Display) -> Self {
        MappingError::InvalidValue {
            field,
            message: message.to_string(),
        }
    }
}

/// Errors that end a use case.
///
/// Business-rule rejections are not errors; they are returned in the
/// response view-model.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Data the use case depends on could not be found.
    #[error("{0}")]
    Precondition(String),

    /// The change would duplicate a value that must be unique.
    #[error("{0}")]
    Conflict(String),

    /// An aggregate failed structural validation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Changes were committed but one or more event handlers failed.
    #[error(transparent)]
    EventDispatch(#[from] DispatchError),
}

impl ApplicationError {
    pub fn precondition(message: impl Into<String>) -> Self {
        ApplicationError::Precondition(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApplicationError::Conflict(message.into())
    }
}
