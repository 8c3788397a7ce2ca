use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hackathon_shared::{
    ApiResponse, CreateWorkshopRequest, EventWorkshopCount, UpdateWorkshopRequest, Workshop,
    WorkshopDetails,
};

use super::ApiResult;
use crate::errors::ApiError;
use crate::server::state::AppState;
use crate::services::WorkshopService;

fn service(state: &AppState) -> Result<WorkshopService, ApiError> {
    state.require_database()?;
    Ok(WorkshopService::new(state.workshops.clone()))
}

pub async fn list_workshops(State(state): State<AppState>) -> ApiResult<Vec<WorkshopDetails>> {
    let workshops = service(&state)?.list().await?;
    Ok(Json(ApiResponse::ok(workshops)))
}

pub async fn list_events(State(state): State<AppState>) -> ApiResult<Vec<EventWorkshopCount>> {
    let events = service(&state)?.events().await?;
    Ok(Json(ApiResponse::ok(events)))
}

pub async fn workshops_by_event(
    State(state): State<AppState>,
    event_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<Workshop>> {
    let Path(event_id) = event_id?;
    let workshops = service(&state)?.by_event(event_id).await?;
    Ok(Json(ApiResponse::ok(workshops)))
}

pub async fn get_workshop(
    State(state): State<AppState>,
    key: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<WorkshopDetails> {
    let Path((event_id, workshop_number)) = key?;
    let workshop = service(&state)?.get(event_id, workshop_number).await?;
    Ok(Json(ApiResponse::ok(workshop)))
}

pub async fn create_workshop(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkshopRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<WorkshopDetails>>), ApiError> {
    let Json(request) = payload?;
    let workshop = service(&state)?.create(&request).await?;

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
    service(&state)?
        .update(event_id, workshop_number, &request)
        .await?;
    Ok(Json(ApiResponse::with_message("Workshop updated successfully", ())))
}

pub async fn delete_workshop(
    State(state): State<AppState>,
    key: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<()> {
    let Path((event_id, workshop_number)) = key?;
    service(&state)?.delete(event_id, workshop_number).await?;
    Ok(Json(ApiResponse::with_message("Workshop deleted successfully", ())))
}
