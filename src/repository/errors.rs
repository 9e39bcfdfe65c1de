use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("The storefront API rejected the credential")]
    Unauthorized,

    #[error("The storefront API answered with HTTP {0}")]
    Status(u16),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Maps a non-success HTTP status returned by the API.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => RepositoryError::Unauthorized,
            404 => RepositoryError::NotFound,
            other => RepositoryError::Status(other),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return RepositoryError::from_status(status.as_u16());
        }
        if err.is_decode() {
            return RepositoryError::DecodeError(err.to_string());
        }
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return RepositoryError::ConnectionError(err.to_string());
        }
        RepositoryError::Unexpected(format!("Unexpected HTTP client error: {err}"))
    }
}
