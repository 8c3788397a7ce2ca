//! # Hackathon Repository
//!
//! This crate provides traits and implementations for interacting with the
//! hackathon data stores. It includes definitions for errors, interfaces, a
//! MySQL implementation of the relational repositories, a MongoDB
//! implementation of the document store, and the seed dataset.

pub mod errors;
pub mod interfaces;
pub mod mongo;
pub mod mysql;
pub mod seed;

pub use errors::{DocumentStoreError, RepositoryError};
pub use interfaces::{
    AnalyticsRepository, DatasetRepository, DocumentStore, SubmissionRepository,
    WorkshopRemoval, WorkshopRepository,
};
pub use mongo::MongoDocumentStore;
pub use mysql::{
    MySqlAnalyticsRepository, MySqlDatasetRepository, MySqlSubmissionRepository,
    MySqlWorkshopRepository,
};
pub use seed::seed_dataset;
