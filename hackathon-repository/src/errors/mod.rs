//! Error types for the hackathon repositories.
//! Consolidates and re-exports the relational and document store errors.
mod document_store;
mod repository;

pub use document_store::DocumentStoreError;
pub use repository::RepositoryError;
