//! US Letter PDF with the built-in Helvetica faces.
//!
//! Built-in PDF fonts carry no glyph tables, so text is reduced to ASCII
//! before layout and wrapped on an average glyph width.

use bytes::Bytes;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::models::Resume;
use crate::render::{contact_line, filled_sections, RenderError, Renderer};

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 19.05;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.3;

const NAME_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.5;
/// Helvetica averages a little over half an em per glyph.
const AVG_GLYPH_EM: f32 = 0.52;

pub struct PdfRenderer;

impl Renderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, resume: &Resume) -> Result<Bytes, RenderError> {
        let name = pdf_safe(resume.name.trim());
        let mut page = PageWriter::new(&format!("{name} Resume"))?;

        page.line(&name, NAME_SIZE, true);
        page.paragraph(&contact_line(resume), BODY_SIZE);
        page.gap(5.0);

        for (section, body) in filled_sections(resume) {
            page.gap(3.0);
            page.line(&section.title().to_uppercase(), HEADING_SIZE, true);
            page.gap(1.5);
            for line in body.lines() {
                page.paragraph(line, BODY_SIZE);
            }
        }

        page.finish()
    }
}

/// Cursor over the current page; starts a new page when the bottom margin is reached.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let height = size * PT_TO_MM * LINE_SPACING;
        if self.y - height < MARGIN_MM {
            self.new_page();
        }
        self.y -= height;

        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(pdf_safe(text), size, Mm(MARGIN_MM), Mm(self.y), font);
    }

    /// Wrapped body text. A blank line keeps its vertical space.
    fn paragraph(&mut self, text: &str, size: f32) {
        let wrapped = wrap(&pdf_safe(text), chars_per_line(size));
        if wrapped.is_empty() {
            self.gap(size * PT_TO_MM * LINE_SPACING);
        }
        for line in wrapped {
            self.line(&line, size, false);
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn finish(self) -> Result<Bytes, RenderError> {
        self.doc
            .save_to_bytes()
            .map(Bytes::from)
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

fn chars_per_line(size: f32) -> usize {
    let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    (usable / (size * PT_TO_MM * AVG_GLYPH_EM)) as usize
}

/// ASCII rendition of `text`: bullets and dashes become `-`, curly quotes
/// become straight ones, anything else outside ASCII becomes `?`.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' | '–' | '—' | '‐' => '-',
            '‘' | '’' => '\'',
            '“' | '”' => '"',
            '\t' => ' ',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap. Words longer than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let (head, tail) = word.split_at(width);
            lines.push(head.to_string());
            word = tail;
        }
        if word.is_empty() {
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
