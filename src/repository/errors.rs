use thiserror::Error;

use crate::storage::StorageError;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    /// An insert in the registration workflow affected no rows.
    #[error("insert denied for {0}")]
    InsertDenied(&'static str),
    /// An update in the registration workflow affected no rows.
    #[error("update denied for {0}")]
    UpdateDenied(&'static str),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}
