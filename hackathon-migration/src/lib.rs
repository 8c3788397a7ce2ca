//! # Hackathon Migration
//!
//! This crate builds the denormalized document replica from the relational
//! store. The pipeline has three steps:
//!
//! 1. [`LookupIndexes::build`] indexes every table by primary and foreign key.
//! 2. [`transform`] builds participant, event and submission documents and
//!    counts dangling references in [`MigrationWarnings`].
//! 3. [`MigrationExecutor::execute`] reads the dataset, runs the two steps
//!    above and replaces the document collections.
//!
//! Only the executor performs I/O.

pub mod errors;
pub mod executor;
pub mod index;
pub mod transform;

pub use errors::MigrationError;
pub use executor::{MigrationExecutor, MigrationStats};
pub use index::LookupIndexes;
pub use transform::{transform, MigrationOutput, MigrationWarnings};
