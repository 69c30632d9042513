//! Axum route handler for document downloads.

use axum::{
    extract::Query,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use anyhow::anyhow;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::Resume;
use crate::render::{download_file_name, RenderFormat};

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub format: RenderFormat,
}

/// POST /api/v1/resumes/render?format=pdf|docx|text|markdown
///
/// Renders the posted resume and returns it as an attachment. PDF is the
/// default format.
pub async fn handle_render(
    Query(query): Query<RenderQuery>,
    Json(resume): Json<Resume>,
) -> Result<Response, AppError> {
    if resume.name.trim().is_empty() {
        return Err(AppError::Validation("Resume name is required".to_string()));
    }

    let renderer = query.format.renderer();
    let content_type = renderer.content_type();
    let file_name = download_file_name(&resume.name, renderer.file_extension());

    // Document layout is CPU-bound.
    let body = tokio::task::spawn_blocking(move || renderer.render(&resume))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Render task failed: {e}")))?
        .map_err(|e| AppError::Internal(e.into()))?;

    info!("Rendered {file_name} ({} bytes)", body.len());

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response())
}
