use std::io::Cursor;

use bytes::Bytes;
use docx_rs::{AlignmentType, Docx, Paragraph, Run};

use crate::models::Resume;
use crate::render::{contact_line, filled_sections, RenderError, Renderer};

/// Run sizes are in half-points.
const NAME_SIZE: usize = 48;
const HEADING_SIZE: usize = 28;
const ACCENT_COLOR: &str = "1E88E5";

pub struct DocxRenderer;

impl Renderer for DocxRenderer {
    fn content_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn file_extension(&self) -> &'static str {
        "docx"
    }

    fn render(&self, resume: &Resume) -> Result<Bytes, RenderError> {
        let mut docx = Docx::new()
            .add_paragraph(
                Paragraph::new().align(AlignmentType::Center).add_run(
                    Run::new()
                        .add_text(resume.name.trim())
                        .size(NAME_SIZE)
                        .bold()
                        .color(ACCENT_COLOR),
                ),
            )
            .add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_text(contact_line(resume))),
            );

        for (section, body) in filled_sections(resume) {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(section.title().to_uppercase())
                        .size(HEADING_SIZE)
                        .bold(),
                ),
            );
            for line in body.lines() {
                docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
            }
        }

        let mut buf = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buf)
            .map_err(|e| RenderError::Docx(e.to_string()))?;
        Ok(Bytes::from(buf.into_inner()))
    }
}
