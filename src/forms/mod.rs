//! Form definitions backing the table routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod tables;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed form body: {0}")]
    Malformed(String),

    #[error("{field}: {source}")]
    InvalidField {
        field: &'static str,
        source: TypeConstraintError,
    },

    #[error("start date must not be after end date")]
    DateRange,
}
