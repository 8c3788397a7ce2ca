//! Business rules between the HTTP handlers and the repositories.

pub mod analytics;
pub mod submissions;
pub mod workshops;

pub use analytics::{AnalyticsError, AnalyticsService};
pub use submissions::{CreatedSubmission, SubmissionError, SubmissionService};
pub use workshops::{DocumentWorkshopService, WorkshopError, WorkshopService};
