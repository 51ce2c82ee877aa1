//! Errors returned by store implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write (e.g. a session token already in use).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend failed (connection loss, unexpected constraint, bad row).
    #[error("store backend error: {0}")]
    Backend(String),
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}
