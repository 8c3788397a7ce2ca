// App state for Axum server
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use hackathon_repository::{
    AnalyticsRepository, DatasetRepository, DocumentStore, SubmissionRepository,
    WorkshopRepository,
};

use crate::errors::ApiError;

/// Source of the current UTC time.
pub type Clock = fn() -> NaiveDateTime;

pub fn system_clock() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Shared handles passed to every handler.
///
/// The document store is optional: the API keeps serving relational
/// endpoints when MongoDB could not be reached at startup.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<dyn DatasetRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub workshops: Arc<dyn WorkshopRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub documents: Option<Arc<dyn DocumentStore>>,
    pub clock: Clock,
    schema_ready: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(
        dataset: Arc<dyn DatasetRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        workshops: Arc<dyn WorkshopRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        documents: Option<Arc<dyn DocumentStore>>,
    ) -> Self {
        Self {
            dataset,
            submissions,
            workshops,
            analytics,
            documents,
            clock: system_clock,
            schema_ready: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub fn mark_schema_ready(&self) {
        self.schema_ready.store(true, Ordering::SeqCst);
    }

    pub fn is_schema_ready(&self) -> bool {
        self.schema_ready.load(Ordering::SeqCst)
    }

    /// Fails with 503 until the relational schema has been created.
    pub fn require_database(&self) -> Result<(), ApiError> {
        if self.is_schema_ready() {
            Ok(())
        } else {
            Err(ApiError::service_unavailable("Database not initialized"))
        }
    }

    /// The document store, or 503 when it is not connected.
    pub fn document_store(&self) -> Result<Arc<dyn DocumentStore>, ApiError> {
        self.documents
            .clone()
            .ok_or_else(|| ApiError::service_unavailable("MongoDB not connected"))
    }
}
