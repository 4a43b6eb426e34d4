pub mod news;
pub mod songs;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, response::IntoResponse, routing::get, Json, Router};
use http::StatusCode;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use news::news_routes;
pub use songs::song_routes;

use crate::utils::{config::Config, state::AppState};

/// Upper bound for a single request body; audio uploads are the largest.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn make_app(config: Config) -> Router {
    info!("Initializing application...");
    let state = Arc::new(AppState::init(config));
    info!("Backend clients initialized successfully");

    let app = build_router(state);
    info!("Application initialized successfully");
    app
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .nest("/songs", song_routes())
        .nest("/news", news_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": "Songs & news API"}))).into_response()
}
