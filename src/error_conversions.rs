//! Error conversion glue between the domain and service layers.
//!
//! The domain layer must not depend on service error types, so the `From`
//! impls for its constraint errors live here.

use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}
