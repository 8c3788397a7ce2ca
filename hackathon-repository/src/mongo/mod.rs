//! MongoDB implementation of the document store.
//!
//! Holds the denormalized `participants`, `events` and `submissions`
//! collections. Documents are written with typed collections and read back
//! through aggregation pipelines deserialized into the shared types.

mod document_store;

pub use document_store::{MongoDocumentStore, SKILL_LEVEL_INDEX, START_DATE_INDEX};
