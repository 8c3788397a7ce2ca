// Migration executor - orchestrates the relational to document flow
use std::sync::Arc;
use std::time::Instant;

use hackathon_repository::{DatasetRepository, DocumentStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::MigrationError;
use crate::index::LookupIndexes;
use crate::transform::{transform, MigrationWarnings};

/// Summary of one migration run, as reported to API clients.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationStats {
    pub participants: usize,
    pub events: usize,
    pub submissions: usize,
    pub warnings_reg_missing_event: u64,
    pub warnings_reg_missing_person: u64,
    pub warnings_creates_missing_submission: u64,
    pub warnings_creates_missing_person: u64,
    pub warnings_submissions_missing_event: u64,
    pub warnings_supports_missing_sponsor: u64,
    pub warnings_evaluates_missing_judge: u64,
}

impl MigrationStats {
    fn new(participants: usize, events: usize, submissions: usize, warnings: &MigrationWarnings) -> Self {
        Self {
            participants,
            events,
            submissions,
            warnings_reg_missing_event: warnings.registrations_missing_event,
            warnings_reg_missing_person: warnings.registrations_missing_person,
            warnings_creates_missing_submission: warnings.creates_missing_submission,
            warnings_creates_missing_person: warnings.creates_missing_person,
            warnings_submissions_missing_event: warnings.submissions_missing_event,
            warnings_supports_missing_sponsor: warnings.supports_missing_sponsor,
            warnings_evaluates_missing_judge: warnings.evaluates_missing_judge,
        }
    }
}

/// Migration executor that coordinates the migration process.
///
/// Reads the complete relational dataset, builds every document in memory and
/// only then replaces the document collections, so a relational failure never
/// leaves the document store half written.
pub struct MigrationExecutor {
    dataset: Arc<dyn DatasetRepository>,
    documents: Arc<dyn DocumentStore>,
}

impl MigrationExecutor {
    /// Create a new migration executor.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Source of the relational rows
    /// * `documents` - Target document store
    pub fn new(dataset: Arc<dyn DatasetRepository>, documents: Arc<dyn DocumentStore>) -> Self {
        Self { dataset, documents }
    }

    /// Execute the full migration process.
    ///
    /// # Returns
    ///
    /// * `Ok(MigrationStats)` - Document counts and anomaly counters
    /// * `Err(MigrationError)` - Reading or writing failed; see the variant
    pub async fn execute(&self) -> Result<MigrationStats, MigrationError> {
        let start_time = Instant::now();

        let dataset = self.dataset.load_dataset().await?;
        let counts = dataset.table_counts();
        info!(
            people = counts.person,
            events = counts.hackathon_event,
            submissions = counts.submission,
            registrations = counts.registration,
            "Read relational dataset"
        );

        let indexes = LookupIndexes::build(&dataset);
        let output = transform(&dataset, &indexes);
        let warnings = output.warnings;
        if warnings.total() > 0 {
            warn!(
                registrations_missing_event = warnings.registrations_missing_event,
                registrations_missing_person = warnings.registrations_missing_person,
                creates_missing_submission = warnings.creates_missing_submission,
                creates_missing_person = warnings.creates_missing_person,
                submissions_missing_event = warnings.submissions_missing_event,
                supports_missing_sponsor = warnings.supports_missing_sponsor,
                evaluates_missing_judge = warnings.evaluates_missing_judge,
                "Dangling references skipped during migration"
            );
        }

        self.documents.replace_collections(&output.documents).await?;

        let stats = MigrationStats::new(
            output.documents.participants.len(),
            output.documents.events.len(),
            output.documents.submissions.len(),
            &warnings,
        );
        info!(
            participants = stats.participants,
            events = stats.events,
            submissions = stats.submissions,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Migration complete"
        );

        Ok(stats)
    }
}
