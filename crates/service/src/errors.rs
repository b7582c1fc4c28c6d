use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("student {0} already exists")]
    AlreadyExists(i64),
    #[error("student {0} not found")]
    NotFound(i64),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// Absent record as opposed to a failing store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
