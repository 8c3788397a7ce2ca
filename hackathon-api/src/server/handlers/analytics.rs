use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use hackathon_shared::analytics::{
    RegistrationOverviewReport, SubmissionActivityReport, SystemSummary, WorkshopAnalyticsReport,
};
use hackathon_shared::ApiResponse;
use serde::Deserialize;

use super::ApiResult;
use crate::errors::ApiError;
use crate::server::state::AppState;
use crate::services::AnalyticsService;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeQuery {
    pub event_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevelQuery {
    pub skill_level: Option<String>,
}

fn service(state: &AppState) -> Result<AnalyticsService, ApiError> {
    state.require_database()?;
    Ok(AnalyticsService::new(state.analytics.clone()))
}

pub async fn submission_activity(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> ApiResult<SubmissionActivityReport> {
    let Query(query) = query?;
    let report = service(&state)?
        .submission_activity(
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            state.now().date(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn registration_overview(
    State(state): State<AppState>,
    query: Result<Query<EventTypeQuery>, QueryRejection>,
) -> ApiResult<RegistrationOverviewReport> {
    let Query(query) = query?;
    let report = service(&state)?
        .registration_overview(query.event_type.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn workshop_overview(
    State(state): State<AppState>,
    query: Result<Query<SkillLevelQuery>, QueryRejection>,
) -> ApiResult<WorkshopAnalyticsReport> {
    let Query(query) = query?;
    let report = service(&state)?
        .workshop_overview(query.skill_level.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn summary(State(state): State<AppState>) -> ApiResult<SystemSummary> {
    let summary = service(&state)?.summary().await?;
    Ok(Json(ApiResponse::ok(summary)))
}
