//! MySQL implementation of the hackathon repositories.
//!
//! Provides the relational backend for the repository traits on top of a
//! shared `sqlx::MySqlPool`.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::MySqlPool`
//! - Embedded schema migrations (`migrations/`) applied with [`MIGRATOR`]
//! - Multi-statement writes wrapped in transactions with automatic rollback
//! - Bulk inserts with `QueryBuilder::push_values`
//!
//! ## Database Tables
//!
//! - `Person`, `Participant`, `Judge`: IS-A hierarchy sharing `person_id`
//! - `Venue`, `HackathonEvent`, `Sponsor`, `Submission`
//! - `Workshop`: weak entity keyed by `(workshop_number, event_id)`
//! - `Registration`, `Supports`, `Creates`, `Evaluates`: associations

mod analytics_repository;
mod dataset_repository;
pub mod reader;
mod submission_repository;
mod workshop_repository;

use sqlx::migrate::Migrator;

pub use analytics_repository::MySqlAnalyticsRepository;
pub use dataset_repository::MySqlDatasetRepository;
pub use submission_repository::MySqlSubmissionRepository;
pub use workshop_repository::MySqlWorkshopRepository;

/// Schema migrations embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
