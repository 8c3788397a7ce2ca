use async_trait::async_trait;
use hackathon_shared::{RelationalDataset, TableCounts};

use crate::errors::RepositoryError;

/// Whole-dataset access to the relational store.
///
/// Used by the migration pipeline to read every table in one pass and by the
/// data import to replace every table in one transaction.
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Create the relational schema if it does not exist yet.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The schema is present and up to date
    /// * `Err(RepositoryError)` - The migration could not be applied
    async fn ensure_schema(&self) -> Result<(), RepositoryError>;

    /// Check that the database answers a trivial query.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// Read the full contents of all twelve tables.
    ///
    /// Any failure aborts the whole read; a partial dataset is never returned.
    async fn load_dataset(&self) -> Result<RelationalDataset, RepositoryError>;

    /// Replace the contents of all twelve tables with `dataset`.
    ///
    /// Runs in a single transaction: on failure the previous contents remain.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Rows to write; primary keys are written as given
    ///
    /// # Returns
    ///
    /// * `Ok(TableCounts)` - Number of rows written per table
    /// * `Err(RepositoryError)` - The transaction was rolled back
    async fn replace_dataset(
        &self,
        dataset: &RelationalDataset,
    ) -> Result<TableCounts, RepositoryError>;

    /// Row counts of every table.
    async fn table_counts(&self) -> Result<TableCounts, RepositoryError>;
}
