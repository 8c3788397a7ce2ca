//! Interface definitions for the hackathon repositories.
//!
//! The traits here allow the API and the migration pipeline to run against
//! MySQL and MongoDB in production and against in-memory mocks in tests.

mod analytics_repository;
mod dataset_repository;
mod document_store;
mod submission_repository;
mod workshop_repository;

pub use analytics_repository::AnalyticsRepository;
pub use dataset_repository::DatasetRepository;
pub use document_store::{DocumentStore, WorkshopRemoval};
pub use submission_repository::SubmissionRepository;
pub use workshop_repository::WorkshopRepository;
