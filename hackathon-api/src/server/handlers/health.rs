use axum::extract::State;
use axum::Json;
use hackathon_shared::{ApiResponse, HealthStatus};
use tracing::warn;

use crate::server::state::AppState;

/// Health check endpoint.
///
/// Always answers 200; the payload reports each store separately.
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let mysql = match state.dataset.ping().await {
        Ok(()) if state.is_schema_ready() => "connected",
        Ok(()) => "not initialized",
        Err(e) => {
            warn!(error = %e, "MySQL health check failed");
            "disconnected"
        }
    };

    let mongodb = match &state.documents {
        Some(store) => match store.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                warn!(error = %e, "MongoDB health check failed");
                "disconnected"
            }
        },
        None => "not connected",
    };

    let status = if mysql == "connected" { "healthy" } else { "degraded" };

    Json(ApiResponse::ok(HealthStatus {
        status: status.to_string(),
        mysql: mysql.to_string(),
        mongodb: mongodb.to_string(),
    }))
}
