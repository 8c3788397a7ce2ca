//! Error types for the relational repositories.
use thiserror::Error;

/// Represents errors that can occur within the relational repositories.
///
/// This enum consolidates the error conditions of MySQL interactions: query
/// failures, schema migration failures and rows that cannot be mapped onto
/// the shared row types.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Schema migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Returns true when the failure comes from reaching the database rather
    /// than from the statement itself.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(
                sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
            )
        )
    }
}
