//! Common error types for InternLink

use thiserror::Error;

/// Common result type for InternLink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across InternLink services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid caller identity, or ownership mismatch
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the underlying database error reports a column the table
    /// does not have (schema drift between code and store).
    ///
    /// SQLite: `table x has no column named y`; PostgreSQL: SQLSTATE 42703.
    pub fn is_unknown_column(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("42703")
                    || db_err.message().contains("no column named")
                    || db_err.message().contains("no such column")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn test_unknown_column_detected() {
        let pool = init_memory_database().await.unwrap();
        let err: Error = sqlx::query("INSERT INTO users (id, email, nickname, created_at) VALUES ('a', 'b', 'c', 'd')")
            .execute(&pool)
            .await
            .unwrap_err()
            .into();

        assert!(err.is_unknown_column(), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_other_database_errors_are_not_unknown_column() {
        let pool = init_memory_database().await.unwrap();
        let err: Error = sqlx::query("INSERT INTO users (id, created_at) VALUES ('a', 'd')")
            .execute(&pool)
            .await
            .unwrap_err()
            .into();

        assert!(!err.is_unknown_column());
        assert!(!Error::NotFound("x".to_string()).is_unknown_column());
    }
}
