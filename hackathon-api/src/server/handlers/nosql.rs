//! Handlers for the document store: migration, stats, embedded workshop
//! CRUD, indexes and analytics. All of them answer 503 while MongoDB is not
//! connected.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hackathon_migration::{MigrationExecutor, MigrationStats};
use hackathon_shared::analytics::WorkshopAnalyticsReport;
use hackathon_shared::{
    ApiResponse, CreateWorkshopRequest, DocumentStoreStats, EventWorkshopCount, IndexInfo,
    UpdateWorkshopRequest, WorkshopDetails,
};

use super::analytics::SkillLevelQuery;
use super::ApiResult;
use crate::errors::ApiError;
use crate::server::state::AppState;
use crate::services::analytics::document_workshop_overview;
use crate::services::DocumentWorkshopService;

fn workshop_service(state: &AppState) -> Result<DocumentWorkshopService, ApiError> {
    Ok(DocumentWorkshopService::new(state.document_store()?))
}

/// Rebuild the document collections from the relational store.
pub async fn migrate(State(state): State<AppState>) -> ApiResult<MigrationStats> {
    let store = state.document_store()?;
    state.require_database()?;

    let stats = MigrationExecutor::new(state.dataset.clone(), store)
        .execute()
        .await?;
    Ok(Json(ApiResponse::with_message("Migration completed", stats)))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<DocumentStoreStats> {
    let stats = state.document_store()?.stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn list_workshops(State(state): State<AppState>) -> ApiResult<Vec<WorkshopDetails>> {
    let workshops = workshop_service(&state)?.list().await?;
    Ok(Json(ApiResponse::ok(workshops)))
}

pub async fn list_events(State(state): State<AppState>) -> ApiResult<Vec<EventWorkshopCount>> {
    let events = workshop_service(&state)?.events().await?;
    Ok(Json(ApiResponse::ok(events)))
}

pub async fn get_workshop(
    State(state): State<AppState>,
    key: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<WorkshopDetails> {
    let Path((event_id, workshop_number)) = key?;
    let workshop = workshop_service(&state)?
        .get(event_id, workshop_number)
        .await?;
    Ok(Json(ApiResponse::ok(workshop)))
}

pub async fn create_workshop(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkshopRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<WorkshopDetails>>), ApiError> {
    let Json(request) = payload?;
    let workshop = workshop_service(&state)?.create(&request).await?;

    let message = format!(
        "Workshop \"{}\" created for {}",
        workshop.title,
        workshop.event_name.as_deref().unwrap_or("event")
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::with_message(message, workshop))))
}

pub async fn update_workshop(
    State(state): State<AppState>,
    key: Result<Path<(i32, i32)>, PathRejection>,
    payload: Result<Json<UpdateWorkshopRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Path((event_id, workshop_number)) = key?;
    let Json(request) = payload?;
    workshop_service(&state)?
        .update(event_id, workshop_number, &request)
        .await?;
    Ok(Json(ApiResponse::with_message("Workshop updated successfully", ())))
}

pub async fn delete_workshop(
    State(state): State<AppState>,
    key: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<()> {
    let Path((event_id, workshop_number)) = key?;
    workshop_service(&state)?
        .delete(event_id, workshop_number)
        .await?;
    Ok(Json(ApiResponse::with_message("Workshop deleted successfully", ())))
}

pub async fn create_indexes(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let created = state.document_store()?.create_indexes().await?;
    Ok(Json(ApiResponse::with_message("Indexes created", created)))
}

pub async fn list_indexes(State(state): State<AppState>) -> ApiResult<Vec<IndexInfo>> {
    let indexes = state.document_store()?.list_indexes().await?;
    Ok(Json(ApiResponse::ok(indexes)))
}

pub async fn workshop_analytics(
    State(state): State<AppState>,
    query: Result<Query<SkillLevelQuery>, QueryRejection>,
) -> ApiResult<WorkshopAnalyticsReport> {
    let Query(query) = query?;
    let store = state.document_store()?;
    let report = document_workshop_overview(store.as_ref(), query.skill_level.as_deref()).await?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn explain_workshop_analytics(
    State(state): State<AppState>,
    query: Result<Query<SkillLevelQuery>, QueryRejection>,
) -> ApiResult<serde_json::Value> {
    let Query(query) = query?;
    let store = state.document_store()?;
    let skill = crate::services::analytics::skill_filter(query.skill_level.as_deref());
    let plan = store.explain_workshop_analytics(skill).await?;
    Ok(Json(ApiResponse::ok(plan)))
}
