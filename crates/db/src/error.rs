//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// No connection could be checked out of the pool.
    #[error("connection pool: {0}")]
    Pool(String),
}
