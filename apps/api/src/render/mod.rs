//! Renderer: turns a finished `Resume` into a downloadable document.
//!
//! Layout is fixed: name, contact line, then the six sections in canonical
//! order under their display titles. Empty sections are left out.

use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Resume, Section};

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod text;

pub use docx::DocxRenderer;
pub use pdf::PdfRenderer;
pub use text::{MarkdownRenderer, PlainTextRenderer};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("DOCX rendering failed: {0}")]
    Docx(String),
}

pub trait Renderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn file_extension(&self) -> &'static str;
    fn render(&self, resume: &Resume) -> Result<Bytes, RenderError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Pdf,
    Docx,
    Text,
    Markdown,
}

impl RenderFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            RenderFormat::Pdf => Box::new(PdfRenderer),
            RenderFormat::Docx => Box::new(DocxRenderer),
            RenderFormat::Text => Box::new(PlainTextRenderer),
            RenderFormat::Markdown => Box::new(MarkdownRenderer),
        }
    }
}

pub(crate) fn contact_line(resume: &Resume) -> String {
    format!("{} | {}", resume.phone.trim(), resume.email.trim())
}

/// Non-empty sections in canonical order, trimmed.
pub(crate) fn filled_sections(resume: &Resume) -> impl Iterator<Item = (Section, &str)> + '_ {
    resume
        .sections()
        .map(|(section, body)| (section, body.trim()))
        .filter(|(_, body)| !body.is_empty())
}

/// `Jane_Doe_Resume.txt`. Characters that cannot appear in a header value are dropped.
pub fn download_file_name(name: &str, extension: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();

    if stem.is_empty() {
        format!("Resume.{extension}")
    } else {
        format!("{stem}_Resume.{extension}")
    }
}
