//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::upload::{multipart_error, parse_upload, UploadedFile, RESUME_FILE_FIELD};
use crate::generation::{GenerationOutcome, GenerationSource};
use crate::models::{RawInput, Resume, Score, Section};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub resume: Resume,
    pub score: Score,
    pub source: GenerationSource,
    pub repaired_sections: Vec<Section>,
    pub attempts: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Validates the submission, generates the resume and scores it.
/// Only validation can fail; service problems end in the fallback resume.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<RawInput>,
) -> Result<Json<GenerateResponse>, AppError> {
    let input = request.validate()?;
    let response = generate_and_score(&state, input).await?;
    Ok(Json(response))
}

/// POST /api/v1/resumes/generate-with-upload
///
/// Multipart form with the `RawInput` text fields and an optional
/// `resume_file`. An unreadable file is ignored, not rejected.
pub async fn handle_generate_with_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let (request, upload) = read_generation_form(multipart).await?;
    let mut input = request.validate()?;

    if let Some(upload) = upload {
        input.extracted = parse_upload(&state.extractor, upload).await;
    }

    let response = generate_and_score(&state, input).await?;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn generate_and_score(state: &AppState, input: RawInput) -> Result<GenerateResponse, AppError> {
    let request_id = Uuid::new_v4();
    info!(
        "[{request_id}] Generating resume for role '{}' (jd: {}, upload: {})",
        input.target_role,
        input.has_job_description(),
        input.extracted.is_some()
    );

    let outcome = run_generation(state, &input).await?;

    let score = state.scorer.score(
        &outcome.resume,
        &input.job_description,
        &input.target_role,
    );

    info!(
        "[{request_id}] Done: source={:?} attempts={} repaired={:?} score={}",
        outcome.source, outcome.attempts, outcome.repaired_sections, score.total
    );

    Ok(GenerateResponse {
        request_id,
        generated_at: Utc::now(),
        resume: outcome.resume,
        score,
        source: outcome.source,
        repaired_sections: outcome.repaired_sections,
        attempts: outcome.attempts,
    })
}

/// Runs generation on its own task. If the client goes away and this future is
/// dropped, the guard cancels the in-flight service call.
async fn run_generation(state: &AppState, input: &RawInput) -> Result<GenerationOutcome, AppError> {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let generator = state.generator.clone();
    let input = input.clone();
    let outcome = tokio::spawn(async move { generator.generate_with_cancel(&input, cancel).await })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("generation task failed: {e}")))?;

    Ok(outcome)
}

/// Collects the multipart form into a `RawInput` plus the optional file part.
async fn read_generation_form(
    mut multipart: Multipart,
) -> Result<(RawInput, Option<UploadedFile>), AppError> {
    let mut input = RawInput::default();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == RESUME_FILE_FIELD {
            upload = UploadedFile::from_field(field).await?;
            continue;
        }

        let slot = match name.as_str() {
            "full_name" => &mut input.full_name,
            "phone" => &mut input.phone,
            "email" => &mut input.email,
            "target_role" => &mut input.target_role,
            "education" => &mut input.education,
            "experience" => &mut input.experience,
            "projects" => &mut input.projects,
            "skills" => &mut input.skills,
            "certifications" => &mut input.certifications,
            "job_description" => &mut input.job_description,
            other => {
                debug!("Ignoring form field '{other}'");
                continue;
            }
        };
        *slot = field.text().await.map_err(multipart_error)?;
    }

    Ok((input, upload))
}
