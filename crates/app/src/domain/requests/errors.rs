//! Requests service errors.

use thiserror::Error;

use crate::database::{StoreError, StoreErrorKind};

#[derive(Debug, Error)]
pub enum RequestsServiceError {
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("student not found")]
    StudentNotFound,

    #[error("request not found")]
    NotFound,

    #[error("a pending request already exists for this student")]
    PendingRequestExists,

    #[error("storage error")]
    Sql(#[source] StoreError),
}

impl From<StoreError> for RequestsServiceError {
    fn from(error: StoreError) -> Self {
        match error.kind() {
            StoreErrorKind::RowNotFound => Self::NotFound,
            // The partial unique index on (student_matricule WHERE pending)
            // turns a lost check-then-insert race into this violation.
            StoreErrorKind::UniqueViolation => Self::PendingRequestExists,
            StoreErrorKind::ForeignKeyViolation | StoreErrorKind::Other => Self::Sql(error),
        }
    }
}
