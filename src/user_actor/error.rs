use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::validation::ValidationErrors;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User validation error: {0}")]
    Validation(ValidationErrors),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => Self::NotFound(id),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for UserError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}
