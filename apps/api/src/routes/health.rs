use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and which generation path is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let generation = if state.generator.has_service() {
        "service"
    } else {
        "fallback"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resumeforge-api",
        "generation": generation
    }))
}
