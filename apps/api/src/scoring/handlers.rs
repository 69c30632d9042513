//! Axum route handlers for standalone scoring.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Resume, Score};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume: Resume,
    #[serde(default)]
    pub job_description: String,
    /// Defaults to the resume's own target role.
    #[serde(default)]
    pub target_role: Option<String>,
}

/// POST /api/v1/resumes/score
///
/// Re-scores an edited resume without regenerating it.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<Score>, AppError> {
    let target_role = request
        .target_role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(&request.resume.target_role);

    if target_role.trim().is_empty() {
        return Err(AppError::Validation("Target job role is required".to_string()));
    }

    let score = state
        .scorer
        .score(&request.resume, &request.job_description, target_role);

    Ok(Json(score))
}
