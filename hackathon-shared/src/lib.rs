//! # Hackathon Shared
//!
//! Data structures shared across the hackathon backend: relational row types,
//! denormalized document types, request bodies and report rows.

pub mod types;

pub use types::*;
