//! Inscriptions service errors.

use thiserror::Error;

use crate::database::{StoreError, StoreErrorKind};

#[derive(Debug, Error)]
pub enum InscriptionsServiceError {
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("an inscription with this email already exists")]
    AlreadyExists,

    #[error("inscription not found")]
    NotFound,

    #[error("invalid status value")]
    InvalidStatus,

    #[error("storage error")]
    Sql(#[source] StoreError),
}

impl From<StoreError> for InscriptionsServiceError {
    fn from(error: StoreError) -> Self {
        match error.kind() {
            StoreErrorKind::RowNotFound => Self::NotFound,
            StoreErrorKind::UniqueViolation => Self::AlreadyExists,
            StoreErrorKind::ForeignKeyViolation | StoreErrorKind::Other => Self::Sql(error),
        }
    }
}
