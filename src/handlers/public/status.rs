use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - Service descriptor
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Schedule API",
        "version": version,
        "endpoints": {
            "auth": "/api/auth/login, /api/auth/register (public)",
            "schedule": "/api/schedule/list, /add, /update/:id, /delete/:id (bearer token)",
            "user": "/api/user/me (bearer token)",
            "health": "/health (public)",
        }
    }))
}

/// GET /health - Liveness plus store connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

/// Fallback for paths no route matches
pub async fn not_found() -> ApiError {
    ApiError::not_found("No route for this path")
}
