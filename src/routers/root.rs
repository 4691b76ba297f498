use std::path::Path;

use axum::{Router, extract::State, routing::get};
use tower_http::services::{ServeDir, ServeFile};

use crate::{controllers::RootController, state::AppState};

pub async fn health_check_route(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    RootController::health_check(&state).await
}

/// `/health`, the UI page at `/`, and its assets under `/static`.
pub fn root_routes(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check_route))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
}
