use axum::extract::State;
use axum::Json;
use hackathon_repository::seed_dataset;
use hackathon_shared::{ApiResponse, TableCounts};
use tracing::info;

use super::ApiResult;
use crate::server::state::AppState;

/// Create the schema if needed and replace every table with the seed dataset.
///
/// Does not require the schema to exist beforehand; on success the
/// relational endpoints become available.
pub async fn import_data(State(state): State<AppState>) -> ApiResult<TableCounts> {
    state.dataset.ensure_schema().await?;
    state.mark_schema_ready();

    let dataset = seed_dataset(state.now().date());
    let counts = state.dataset.replace_dataset(&dataset).await?;
    info!(
        people = counts.person,
        events = counts.hackathon_event,
        submissions = counts.submission,
        "Imported seed dataset"
    );

    Ok(Json(ApiResponse::with_message(
        "Data imported successfully to MySQL",
        counts,
    )))
}

pub async fn table_stats(State(state): State<AppState>) -> ApiResult<TableCounts> {
    state.require_database()?;
    let counts = state.dataset.table_counts().await?;
    Ok(Json(ApiResponse::ok(counts)))
}
