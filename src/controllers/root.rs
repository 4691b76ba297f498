use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::state::AppState;

pub struct RootController;

impl RootController {
    /// Reports whether the song store answers a trivial query.
    pub async fn health_check(state: &AppState) -> Response {
        match state.songs.ping().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({ "status": "ok", "db_healthy": true })),
            )
                .into_response(),
            Err(e) => {
                error!("Health check failed: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "status": "degraded", "db_healthy": false })),
                )
                    .into_response()
            }
        }
    }
}
