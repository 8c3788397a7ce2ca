use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hackathon_shared::{
    ApiResponse, AvailableEvent, CreateSubmissionRequest, EventParticipant, ParticipantListing,
    SubmissionSummary,
};

use super::ApiResult;
use crate::errors::ApiError;
use crate::server::state::AppState;
use crate::services::SubmissionService;

fn service(state: &AppState) -> Result<SubmissionService, ApiError> {
    state.require_database()?;
    Ok(SubmissionService::new(state.submissions.clone()))
}

pub async fn list_submissions(State(state): State<AppState>) -> ApiResult<Vec<SubmissionSummary>> {
    let submissions = service(&state)?.list().await?;
    Ok(Json(ApiResponse::ok(submissions)))
}

pub async fn get_submission(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<SubmissionSummary> {
    let Path(id) = id?;
    let submission = service(&state)?.get(id).await?;
    Ok(Json(ApiResponse::ok(submission)))
}

pub async fn create_submission(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubmissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionSummary>>), ApiError> {
    let Json(request) = payload?;
    let created = service(&state)?.create(&request, state.now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            format!("Project submitted successfully to {}!", created.event_name),
            created.submission,
        )),
    ))
}

pub async fn delete_submission(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    service(&state)?.delete(id).await?;
    Ok(Json(ApiResponse::with_message("Submission deleted successfully", ())))
}

/// Events whose submission period is still open today.
pub async fn available_events(State(state): State<AppState>) -> ApiResult<Vec<AvailableEvent>> {
    let events = service(&state)?.open_events(state.now().date()).await?;
    Ok(Json(ApiResponse::ok(events)))
}

pub async fn event_participants(
    State(state): State<AppState>,
    event_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<EventParticipant>> {
    let Path(event_id) = event_id?;
    let participants = service(&state)?.event_participants(event_id).await?;
    Ok(Json(ApiResponse::ok(participants)))
}

pub async fn list_participants(State(state): State<AppState>) -> ApiResult<Vec<ParticipantListing>> {
    let participants = service(&state)?.participants().await?;
    Ok(Json(ApiResponse::ok(participants)))
}
