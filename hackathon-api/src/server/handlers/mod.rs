// HTTP request handlers, one module per resource area
pub mod analytics;
pub mod data;
pub mod health;
pub mod nosql;
pub mod submissions;
pub mod workshops;

use axum::Json;
use hackathon_shared::ApiResponse;

use crate::errors::ApiError;

/// Result type returned by every JSON handler.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
