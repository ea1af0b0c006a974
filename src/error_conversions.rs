//! Error conversion glue between the `data` layer and the services.
//!
//! The validation and domain layers must not depend on service error types,
//! so the conversions live here and only compile with the `server` feature.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;
use crate::validation::UnknownFieldKind;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(FormError::TypeConstraint(val))
    }
}

impl From<UnknownFieldKind> for ServiceError {
    fn from(val: UnknownFieldKind) -> Self {
        ServiceError::UnknownField(val.0)
    }
}
