pub mod root;
pub mod song;
pub use root::{health_check_route, root_routes};
pub use song::song_routes;

use std::path::Path;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// The complete application: REST API under `/api/v1`, health check, and the static UI.
pub fn app_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Millis),
        )
        .on_failure(DefaultOnFailure::new().level(Level::ERROR));

    Router::new()
        .nest("/api/v1", song_routes())
        .merge(root_routes(static_dir))
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
        .with_state(state)
}
