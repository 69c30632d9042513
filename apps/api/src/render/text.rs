use bytes::Bytes;

use crate::models::Resume;
use crate::render::{contact_line, filled_sections, RenderError, Renderer};

pub struct PlainTextRenderer;

impl Renderer for PlainTextRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, resume: &Resume) -> Result<Bytes, RenderError> {
        let mut out = String::new();
        out.push_str(resume.name.trim());
        out.push('\n');
        out.push_str(&contact_line(resume));
        out.push('\n');

        for (section, body) in filled_sections(resume) {
            let title = section.title().to_uppercase();
            out.push('\n');
            out.push_str(&title);
            out.push('\n');
            out.push_str(&"-".repeat(title.chars().count()));
            out.push('\n');
            out.push_str(body);
            out.push('\n');
        }

        Ok(Bytes::from(out))
    }
}

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn content_type(&self) -> &'static str {
        "text/markdown; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, resume: &Resume) -> Result<Bytes, RenderError> {
        let mut out = format!("# {}\n\n{}\n", resume.name.trim(), contact_line(resume));

        for (section, body) in filled_sections(resume) {
            out.push_str(&format!("\n## {}\n\n", section.title()));
            for line in body.lines() {
                match line.strip_prefix("• ") {
                    Some(item) => out.push_str(&format!("- {item}")),
                    None => out.push_str(line),
                }
                out.push('\n');
            }
        }

        Ok(Bytes::from(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume() -> Resume {
        Resume {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            target_role: "Data Scientist".to_string(),
            summary: "Data scientist.".to_string(),
            skills: "Python, SQL".to_string(),
            experience: "Analyst | Acme\n• Built dashboards".to_string(),
            projects: String::new(),
            education: "MSc Statistics".to_string(),
            certifications: "• TensorFlow Developer".to_string(),
        }
    }

    fn render_text(renderer: &dyn Renderer, resume: &Resume) -> String {
        String::from_utf8(renderer.render(resume).unwrap().to_vec()).unwrap()
    }

    #[test]
    fn test_plain_text_layout_and_order() {
        let text = render_text(&PlainTextRenderer, &resume());
        assert!(text.starts_with("Jane Doe\n555-0100 | jane@example.com\n"));

        let positions: Vec<usize> = [
            "PROFESSIONAL SUMMARY",
            "SKILLS",
            "EXPERIENCE",
            "EDUCATION",
            "CERTIFICATIONS & ACHIEVEMENTS",
        ]
        .iter()
        .map(|t| text.find(t).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let text = render_text(&PlainTextRenderer, &resume());
        assert!(!text.contains("PROJECTS"));
        let md = render_text(&MarkdownRenderer, &resume());
        assert!(!md.contains("## Projects"));
    }

    #[test]
    fn test_markdown_converts_bullets() {
        let md = render_text(&MarkdownRenderer, &resume());
        assert!(md.starts_with("# Jane Doe\n\n555-0100 | jane@example.com\n"));
        assert!(md.contains("## Experience\n\nAnalyst | Acme\n- Built dashboards\n"));
        assert!(md.contains("## Certifications & Achievements\n\n- TensorFlow Developer\n"));
    }
}
