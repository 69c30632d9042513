pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{extraction, generation, render, scoring};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes/generate",
            post(generation::handlers::handle_generate),
        )
        .route(
            "/api/v1/resumes/generate-with-upload",
            post(generation::handlers::handle_generate_with_upload),
        )
        .route("/api/v1/resumes/score", post(scoring::handlers::handle_score))
        .route("/api/v1/resumes/render", post(render::handlers::handle_render))
        // Upload API
        .route(
            "/api/v1/uploads/extract",
            post(extraction::handlers::handle_extract_upload),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
