//! Error types for the migration executor.
use hackathon_repository::{DocumentStoreError, RepositoryError};
use thiserror::Error;

/// Represents errors that abort a migration run.
///
/// Dangling references inside the dataset are not errors; they are counted in
/// `MigrationWarnings`. Only failures to read the relational store or to write
/// the document store end up here.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Relational store error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Document store error: {0}")]
    DocumentStore(#[from] DocumentStoreError),
}
