//! Analytics report rows and the summaries computed over them.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::submission::SubmissionSummary;

/// Lower bound of the submission activity window when none is given.
pub const DEFAULT_ACTIVITY_START: &str = "2025-11-01 00:00:00";
/// Upper bound of the submission activity window when none is given.
pub const DEFAULT_ACTIVITY_END: &str = "2099-11-10 23:59:59";
/// Event type used by the registration report when none is given.
pub const DEFAULT_EVENT_TYPE: &str = "Hackathon";
/// Skill level filter value that disables filtering.
pub const ALL_SKILL_LEVELS: &str = "all";

/// One row per (submission, creator) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionActivityRow {
    pub submission_id: i32,
    pub project_name: String,
    pub description: Option<String>,
    pub submission_time: NaiveDateTime,
    pub technology_stack: Option<String>,
    pub repository_url: Option<String>,
    pub person_id: i32,
    pub participant_first_name: String,
    pub participant_last_name: String,
    pub participant_email: String,
    pub registration_date: NaiveDate,
    pub t_shirt_size: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub days_since_registration: i64,
    pub total_submissions_by_participant: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionActivitySummary {
    pub total_records: usize,
    pub unique_submissions: usize,
    pub unique_participants: usize,
    pub technology_usage: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeFilter {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionActivityReport {
    pub filter: DateRangeFilter,
    pub summary: SubmissionActivitySummary,
    pub data: Vec<SubmissionActivityRow>,
}

/// Registration statistics for one event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationOverviewRow {
    pub event_id: i32,
    pub event_name: String,
    pub event_type: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_participants: Option<i32>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub venue_capacity: Option<i32>,
    pub total_registrations: i64,
    pub capacity_percentage: Option<f64>,
    pub paid_registrations: i64,
    pub pending_payments: i64,
    /// `"First Last (ticket)"` entries joined with `", "`.
    pub registered_participants: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeFilter {
    pub event_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationOverviewReport {
    pub filter: EventTypeFilter,
    pub data: Vec<RegistrationOverviewRow>,
}

/// One row per workshop with its event and venue flattened in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkshopAnalyticsRow {
    pub workshop_number: i32,
    pub event_id: i32,
    pub workshop_title: String,
    pub workshop_description: Option<String>,
    pub duration: Option<i32>,
    pub skill_level: Option<String>,
    pub max_attendees: Option<i32>,
    pub event_name: String,
    pub event_type: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub event_max_participants: Option<i32>,
    pub venue_id: Option<i32>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub venue_capacity: Option<i32>,
    pub venue_facilities: Option<String>,
    #[serde(default)]
    pub workshops_per_event: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopAnalyticsSummary {
    pub total_workshops: usize,
    pub unique_events: usize,
    pub average_duration: i64,
    pub skill_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevelFilter {
    pub skill_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkshopAnalyticsReport {
    pub filter: SkillLevelFilter,
    pub summary: WorkshopAnalyticsSummary,
    pub data: Vec<WorkshopAnalyticsRow>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemTotals {
    pub total_events: i64,
    pub total_participants: i64,
    pub total_submissions: i64,
    pub total_registrations: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemSummary {
    pub stats: SystemTotals,
    pub recent_submissions: Vec<SubmissionSummary>,
}

/// Summary statistics over submission activity rows.
///
/// Technology stacks are split on `,` and trimmed; every occurrence in every
/// row is counted, so a submission with two creators counts its stack twice.
pub fn summarize_submission_activity(rows: &[SubmissionActivityRow]) -> SubmissionActivitySummary {
    let unique_submissions: HashSet<i32> = rows.iter().map(|r| r.submission_id).collect();
    let unique_participants: HashSet<i32> = rows.iter().map(|r| r.person_id).collect();

    let mut technology_usage = BTreeMap::new();
    for stack in rows.iter().filter_map(|r| r.technology_stack.as_deref()) {
        for tech in stack.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            *technology_usage.entry(tech.to_string()).or_insert(0) += 1;
        }
    }

    SubmissionActivitySummary {
        total_records: rows.len(),
        unique_submissions: unique_submissions.len(),
        unique_participants: unique_participants.len(),
        technology_usage,
    }
}

/// Summary statistics over workshop rows.
///
/// Also fills `workshops_per_event` on every row.
pub fn summarize_workshops(rows: &mut [WorkshopAnalyticsRow]) -> WorkshopAnalyticsSummary {
    let mut per_event: HashMap<i32, i64> = HashMap::new();
    let mut skill_distribution = BTreeMap::new();
    let mut total_duration: i64 = 0;

    for row in rows.iter() {
        *per_event.entry(row.event_id).or_insert(0) += 1;
        let skill = row.skill_level.clone().unwrap_or_else(|| "Unspecified".to_string());
        *skill_distribution.entry(skill).or_insert(0) += 1;
        total_duration += i64::from(row.duration.unwrap_or(0));
    }

    for row in rows.iter_mut() {
        row.workshops_per_event = per_event.get(&row.event_id).copied().unwrap_or(0);
    }

    let average_duration = if rows.is_empty() {
        0
    } else {
        (total_duration as f64 / rows.len() as f64).round() as i64
    };

    WorkshopAnalyticsSummary {
        total_workshops: rows.len(),
        unique_events: per_event.len(),
        average_duration,
        skill_distribution,
    }
}

/// Share of capacity used, rounded to two decimals.
///
/// Returns `None` when the event has no positive capacity.
pub fn capacity_percentage(registrations: i64, max_participants: Option<i32>) -> Option<f64> {
    match max_participants {
        Some(max) if max > 0 => {
            let pct = registrations as f64 * 100.0 / f64::from(max);
            Some((pct * 100.0).round() / 100.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(submission_id: i32, person_id: i32, stack: Option<&str>) -> SubmissionActivityRow {
        SubmissionActivityRow {
            submission_id,
            project_name: format!("Project {}", submission_id),
            description: None,
            submission_time: NaiveDate::from_ymd_opt(2026, 2, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            technology_stack: stack.map(str::to_string),
            repository_url: None,
            person_id,
            participant_first_name: "Grace".to_string(),
            participant_last_name: "Hopper".to_string(),
            participant_email: "grace@example.com".to_string(),
            registration_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            t_shirt_size: None,
            dietary_restrictions: None,
            days_since_registration: 31,
            total_submissions_by_participant: 1,
        }
    }

    fn workshop(event_id: i32, number: i32, duration: Option<i32>, skill: Option<&str>) -> WorkshopAnalyticsRow {
        WorkshopAnalyticsRow {
            workshop_number: number,
            event_id,
            workshop_title: format!("Workshop {}", number),
            workshop_description: None,
            duration,
            skill_level: skill.map(str::to_string),
            max_attendees: Some(30),
            event_name: format!("Event {}", event_id),
            event_type: Some("Hackathon".to_string()),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            event_max_participants: Some(100),
            venue_id: None,
            venue_name: None,
            venue_address: None,
            venue_capacity: None,
            venue_facilities: None,
            workshops_per_event: 0,
        }
    }

    #[test]
    fn test_submission_summary_counts_unique_ids_and_technologies() {
        let rows = vec![
            activity(1, 10, Some("Rust, React")),
            activity(1, 11, Some("Rust, React")),
            activity(2, 10, Some(" Python ,Rust")),
            activity(3, 12, None),
        ];

        let summary = summarize_submission_activity(&rows);

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.unique_submissions, 3);
        assert_eq!(summary.unique_participants, 3);
        assert_eq!(summary.technology_usage.get("Rust"), Some(&3));
        assert_eq!(summary.technology_usage.get("React"), Some(&2));
        assert_eq!(summary.technology_usage.get("Python"), Some(&1));
    }

    #[test]
    fn test_empty_submission_summary() {
        let summary = summarize_submission_activity(&[]);
        assert_eq!(summary, SubmissionActivitySummary::default());
    }

    #[test]
    fn test_workshop_summary_fills_per_event_counts() {
        let mut rows = vec![
            workshop(1, 1, Some(60), Some("Beginner")),
            workshop(1, 2, Some(90), Some("Advanced")),
            workshop(2, 1, Some(45), Some("Beginner")),
        ];

        let summary = summarize_workshops(&mut rows);

        assert_eq!(summary.total_workshops, 3);
        assert_eq!(summary.unique_events, 2);
        assert_eq!(summary.average_duration, 65);
        assert_eq!(summary.skill_distribution.get("Beginner"), Some(&2));
        assert_eq!(rows[0].workshops_per_event, 2);
        assert_eq!(rows[2].workshops_per_event, 1);
    }

    #[test]
    fn test_workshop_summary_without_rows() {
        let summary = summarize_workshops(&mut []);
        assert_eq!(summary.average_duration, 0);
        assert_eq!(summary.unique_events, 0);
    }

    #[test]
    fn test_capacity_percentage_rounds_to_two_decimals() {
        assert_eq!(capacity_percentage(1, Some(3)), Some(33.33));
        assert_eq!(capacity_percentage(0, Some(50)), Some(0.0));
        assert_eq!(capacity_percentage(5, None), None);
        assert_eq!(capacity_percentage(5, Some(0)), None);
    }
}
