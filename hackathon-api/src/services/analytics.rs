//! Report assembly for the analytics endpoints.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use hackathon_repository::{AnalyticsRepository, DocumentStore, DocumentStoreError, RepositoryError};
use hackathon_shared::analytics::{
    summarize_submission_activity, summarize_workshops, DateRangeFilter, EventTypeFilter,
    RegistrationOverviewReport, SkillLevelFilter, SubmissionActivityReport, SystemSummary,
    WorkshopAnalyticsReport, ALL_SKILL_LEVELS, DEFAULT_ACTIVITY_END, DEFAULT_ACTIVITY_START,
    DEFAULT_EVENT_TYPE,
};
use thiserror::Error;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";
const RECENT_SUBMISSIONS: i64 = 5;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    DocumentStore(#[from] DocumentStoreError),
}

/// Which end of a date range a bare date stands for.
#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Parse `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or a bare date.
///
/// A bare date covers the whole day: midnight as a start bound and
/// `23:59:59` as an end bound.
fn parse_bound(raw: &str, bound: Bound) -> Result<NaiveDateTime, AnalyticsError> {
    let raw = raw.trim();
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT) {
        return Ok(value);
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(value);
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AnalyticsError::InvalidDate(raw.to_string()))?;
    let time = match bound {
        Bound::Start => NaiveTime::MIN,
        Bound::End => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
    };
    Ok(date.and_time(time))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Skill level filter, or `None` for `all`.
pub fn skill_filter(skill_level: Option<&str>) -> Option<&str> {
    non_blank(skill_level).filter(|level| !level.eq_ignore_ascii_case(ALL_SKILL_LEVELS))
}

pub struct AnalyticsService {
    repository: Arc<dyn AnalyticsRepository>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn AnalyticsRepository>) -> Self {
        Self { repository }
    }

    /// Submission activity inside `[start, end]`, defaulting to the configured window.
    pub async fn submission_activity(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<SubmissionActivityReport, AnalyticsError> {
        let start_raw = non_blank(start).unwrap_or(DEFAULT_ACTIVITY_START);
        let end_raw = non_blank(end).unwrap_or(DEFAULT_ACTIVITY_END);
        let start = parse_bound(start_raw, Bound::Start)?;
        let end = parse_bound(end_raw, Bound::End)?;

        let data = self.repository.submission_activity(start, end, today).await?;
        Ok(SubmissionActivityReport {
            filter: DateRangeFilter {
                start_date: start.format(DATETIME_FORMAT).to_string(),
                end_date: end.format(DATETIME_FORMAT).to_string(),
            },
            summary: summarize_submission_activity(&data),
            data,
        })
    }

    pub async fn registration_overview(
        &self,
        event_type: Option<&str>,
    ) -> Result<RegistrationOverviewReport, AnalyticsError> {
        let event_type = non_blank(event_type).unwrap_or(DEFAULT_EVENT_TYPE);
        let data = self.repository.registration_overview(event_type).await?;
        Ok(RegistrationOverviewReport {
            filter: EventTypeFilter {
                event_type: event_type.to_string(),
            },
            data,
        })
    }

    pub async fn workshop_overview(
        &self,
        skill_level: Option<&str>,
    ) -> Result<WorkshopAnalyticsReport, AnalyticsError> {
        let filter = skill_filter(skill_level);
        let mut data = self.repository.workshop_overview(filter).await?;
        let summary = summarize_workshops(&mut data);
        Ok(WorkshopAnalyticsReport {
            filter: SkillLevelFilter {
                skill_level: filter.unwrap_or(ALL_SKILL_LEVELS).to_string(),
            },
            summary,
            data,
        })
    }

    pub async fn summary(&self) -> Result<SystemSummary, AnalyticsError> {
        Ok(SystemSummary {
            stats: self.repository.totals().await?,
            recent_submissions: self.repository.recent_submissions(RECENT_SUBMISSIONS).await?,
        })
    }
}

/// Workshop analytics computed by the document store's aggregation pipeline.
pub async fn document_workshop_overview(
    store: &dyn DocumentStore,
    skill_level: Option<&str>,
) -> Result<WorkshopAnalyticsReport, AnalyticsError> {
    let filter = skill_filter(skill_level);
    let mut data = store.workshop_analytics(filter).await?;
    let summary = summarize_workshops(&mut data);
    Ok(WorkshopAnalyticsReport {
        filter: SkillLevelFilter {
            skill_level: filter.unwrap_or(ALL_SKILL_LEVELS).to_string(),
        },
        summary,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_timestamp() {
        let parsed = parse_bound("2026-03-01 08:30:00", Bound::Start).unwrap();
        assert_eq!(parsed.format(DATETIME_FORMAT).to_string(), "2026-03-01 08:30:00");
    }

    #[test]
    fn test_bare_date_covers_whole_day() {
        let start = parse_bound("2026-03-01", Bound::Start).unwrap();
        let end = parse_bound("2026-03-01", Bound::End).unwrap();
        assert_eq!(start.format(DATETIME_FORMAT).to_string(), "2026-03-01 00:00:00");
        assert_eq!(end.format(DATETIME_FORMAT).to_string(), "2026-03-01 23:59:59");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let err = parse_bound("yesterday", Bound::Start).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date: yesterday");
    }

    #[test]
    fn test_skill_filter() {
        assert_eq!(skill_filter(None), None);
        assert_eq!(skill_filter(Some("all")), None);
        assert_eq!(skill_filter(Some("ALL")), None);
        assert_eq!(skill_filter(Some("Advanced")), Some("Advanced"));
    }
}
