pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Browser UI
        .route("/", get(handlers::handle_index))
        .route("/parse", post(handlers::handle_parse_page))
        // JSON API
        .route("/api/v1/resumes/parse", post(handlers::handle_parse_json))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
