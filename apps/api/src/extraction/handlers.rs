//! Axum route handlers for upload extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::upload::{multipart_error, parse_upload, UploadedFile, RESUME_FILE_FIELD};
use crate::models::ParsedUpload;
use crate::state::AppState;

/// POST /api/v1/uploads/extract
///
/// Multipart body with a `resume_file` part. Returns the best-effort parse so
/// a client can preview what will be merged into a generation request.
pub async fn handle_extract_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedUpload>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(RESUME_FILE_FIELD) {
            upload = UploadedFile::from_field(field).await?;
        } else {
            debug!("Ignoring multipart field {:?}", field.name());
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::Validation(format!("{RESUME_FILE_FIELD} is required")))?;

    let parsed = parse_upload(&state.extractor, upload).await.ok_or_else(|| {
        AppError::UnprocessableEntity("Could not extract any text from the uploaded file".to_string())
    })?;

    Ok(Json(parsed))
}
