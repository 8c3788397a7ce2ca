//! # Hackathon API
//!
//! HTTP server for the hackathon management backend. Serves CRUD and
//! analytics over the relational store, runs the document migration and
//! manages the workshops embedded in the document store.

pub mod config;
pub mod errors;
pub mod server;
pub mod services;

pub use config::{AppConfig, Dependencies};
pub use errors::ApiError;
pub use server::state::AppState;
pub use server::{create_app, run_server};
