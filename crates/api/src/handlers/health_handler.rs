//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

const UP: &str = "UP";
const DOWN: &str = "DOWN";

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: ComponentHealth,
}

/// Storage health with optional error message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies storage connectivity.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Storage is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => ComponentHealth {
                status: UP.to_string(),
                backend: "postgres".to_string(),
                error: None,
            },
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                ComponentHealth {
                    status: DOWN.to_string(),
                    backend: "postgres".to_string(),
                    error: Some(e.to_string()),
                }
            }
        },
        None => ComponentHealth {
            status: UP.to_string(),
            backend: "memory".to_string(),
            error: None,
        },
    };

    let healthy = database.status == UP;
    let response = HealthResponse {
        status: if healthy { UP } else { DOWN }.to_string(),
        database,
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
