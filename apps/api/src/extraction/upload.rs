//! Uploaded file → plain text.
//!
//! PDF goes through `pdf-extract` and DOCX through `docx-rs`, both on the
//! blocking pool; plain text is decoded lossily.

use axum::extract::multipart::{Field, MultipartError};
use bytes::Bytes;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::SectionExtractor;
use crate::models::ParsedUpload;

/// Multipart field carrying the resume file.
pub const RESUME_FILE_FIELD: &str = "resume_file";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Upload contained no text")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Docx,
    PlainText,
}

impl UploadKind {
    /// Kind from the file name extension, case-insensitive.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(UploadKind::Pdf),
            "docx" => Some(UploadKind::Docx),
            "txt" => Some(UploadKind::PlainText),
            _ => None,
        }
    }
}

/// A file part read from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Reads a file field. Empty parts (a form submitted without a file) give `None`.
    pub async fn from_field(field: Field<'_>) -> Result<Option<Self>, AppError> {
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { file_name, bytes }))
    }
}

pub fn multipart_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

/// Plain text of an uploaded document. CPU-bound for PDF and DOCX.
pub fn extract_text(kind: UploadKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match kind {
        UploadKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?
        }
        UploadKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        UploadKind::Docx => docx_text(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text)
}

/// Body paragraphs of a DOCX document, one per line.
fn docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let lines: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(lines.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for part in &run.children {
            match part {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
    }
    text
}

/// Full upload path. Any failure is logged and becomes `None`.
pub async fn parse_upload(extractor: &SectionExtractor, upload: UploadedFile) -> Option<ParsedUpload> {
    let Some(kind) = UploadKind::from_file_name(&upload.file_name) else {
        warn!("Ignoring upload '{}': unrecognised file type", upload.file_name);
        return None;
    };

    let bytes = upload.bytes;
    let text = match tokio::task::spawn_blocking(move || extract_text(kind, &bytes)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Ignoring upload '{}': {e}", upload.file_name);
            return None;
        }
        Err(e) => {
            // pdf-extract panics on some malformed documents.
            warn!("Text extraction task failed for '{}': {e}", upload.file_name);
            return None;
        }
    };

    info!(
        "Extracted {} chars of text from '{}'",
        text.chars().count(),
        upload.file_name
    );
    extractor.extract(&text)
}
