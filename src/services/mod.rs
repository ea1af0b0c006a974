//! Services turning submitted form data into backend payloads.

use thiserror::Error;

use crate::forms::FormError;

pub mod validation;

/// Errors surfaced to the HTTP layer by the services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown field kind: {0}")]
    UnknownField(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// Convenient alias for service results.
pub type ServiceResult<T> = Result<T, ServiceError>;
