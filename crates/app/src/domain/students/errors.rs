//! Students service errors.

use thiserror::Error;

use crate::database::{StoreError, StoreErrorKind};

#[derive(Debug, Error)]
pub enum StudentsServiceError {
    #[error("matricule is required")]
    MatriculeRequired,

    #[error("student not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] StoreError),
}

impl From<StoreError> for StudentsServiceError {
    fn from(error: StoreError) -> Self {
        match error.kind() {
            StoreErrorKind::RowNotFound => Self::NotFound,
            _ => Self::Sql(error),
        }
    }
}
