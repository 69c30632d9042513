//! Response Segmenter: splits one block of generated text into the six
//! canonical resume sections.
//!
//! The prompt guarantees (by contract, not by enforcement) that each section
//! starts with its literal header on its own line. Segmentation is therefore:
//!
//! 1. normalize: strip `**` emphasis and heading markers, turn `* ` bullets
//!    into `• `, squeeze runs of spaces/tabs, keep at most one blank line;
//! 2. locate header lines (case-insensitive, optional trailing colon);
//! 3. each section's content runs from its first header line to the header of
//!    the section that follows it in canonical order, or end of text. Any other
//!    header inside that span stays part of the content.
//!
//! A missing header yields an empty capture. That is not an error; the
//! generator's repair ladder fills it in.

use std::collections::HashMap;

use crate::models::Section;

/// Header spellings accepted in addition to `Section::header()`.
const HEADER_ALIASES: &[(&str, Section)] = &[("TECHNICAL SKILLS", Section::Skills)];

/// Section captures from one generated response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedResponse {
    captures: HashMap<Section, String>,
}

impl SegmentedResponse {
    /// Captured text for a section; empty when its header never appeared.
    pub fn get(&self, section: Section) -> &str {
        self.captures.get(&section).map(String::as_str).unwrap_or("")
    }

    /// Sections with a non-empty capture, in canonical order.
    pub fn found(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| !self.get(*s).is_empty())
            .collect()
    }
}

/// Cleans model output before segmentation.
pub fn normalize_response(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = false;

    for raw_line in text.lines() {
        let line = clean_line(raw_line);
        let blank = line.is_empty();
        if blank && (previous_blank || lines.is_empty()) {
            continue;
        }
        previous_blank = blank;
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn clean_line(raw_line: &str) -> String {
    let line = raw_line.replace("**", "");
    let line = line.trim();

    // Markdown heading markers only at line start, so "C#" survives.
    let line = line.trim_start_matches('#').trim_start();

    let line = match line.strip_prefix('*') {
        Some(rest) if rest.starts_with(char::is_whitespace) => format!("• {}", rest.trim_start()),
        _ => line.to_string(),
    };

    squeeze_spaces(&line)
}

/// Collapses runs of spaces and tabs into one space.
fn squeeze_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_run = false;
    for ch in line.chars() {
        if ch == ' ' || ch == '\t' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Recognizes a header line. Returns the section and any text that followed
/// `HEADER:` on the same line.
fn match_header(line: &str) -> Option<(Section, &str)> {
    let candidates = Section::ALL
        .iter()
        .map(|s| (s.header(), *s))
        .chain(HEADER_ALIASES.iter().copied());

    for (header, section) in candidates {
        // Bare header line, any case, optional colon.
        let bare = line.strip_suffix(':').unwrap_or(line).trim_end();
        if bare.eq_ignore_ascii_case(header) {
            return Some((section, ""));
        }

        // "SKILLS: Rust, Go", only when the header itself is written in caps,
        // so prose like "Experience: 3 years" inside a section is left alone.
        if let Some(rest) = line.strip_prefix(header) {
            if let Some(inline) = rest.strip_prefix(':') {
                return Some((section, inline.trim()));
            }
        }
    }
    None
}

/// Splits normalized or raw model output into section captures.
pub fn segment_response(text: &str) -> SegmentedResponse {
    let normalized = normalize_response(text);
    let lines: Vec<&str> = normalized.lines().collect();

    // (line index, section, inline remainder) for every header line.
    let headers: Vec<(usize, Section, &str)> = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| match_header(line).map(|(s, inline)| (idx, s, inline)))
        .collect();

    let mut captures = HashMap::new();

    for (pos, &(start, section, inline)) in headers.iter().enumerate() {
        if captures.contains_key(&section) {
            continue; // first occurrence wins
        }

        let successor = section.next();
        let end = headers[pos + 1..]
            .iter()
            .find(|&&(_, next, _)| Some(next) == successor)
            .map(|&(idx, _, _)| idx)
            .unwrap_or(lines.len());

        let mut body: Vec<&str> = Vec::new();
        if !inline.is_empty() {
            body.push(inline);
        }
        body.extend_from_slice(&lines[start + 1..end]);

        captures.insert(section, body.join("\n").trim().to_string());
    }

    SegmentedResponse { captures }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "PROFESSIONAL SUMMARY:
Backend engineer with 4 years of Rust.

SKILLS:
Rust, Tokio, PostgreSQL

EXPERIENCE:
Engineer | Initech
2021 - Present
* Cut p99 latency by 40%

PROJECTS:
Search Engine | Rust
* Indexed 1M documents

EDUCATION:
BSc Computer Science

CERTIFICATIONS:
* AWS Solutions Architect (2023)";

    #[test]
    fn test_well_formed_response_splits_all_sections() {
        let segmented = segment_response(WELL_FORMED);
        assert_eq!(segmented.found(), Section::ALL.to_vec());
        assert_eq!(segmented.get(Section::Skills), "Rust, Tokio, PostgreSQL");
        assert_eq!(
            segmented.get(Section::Experience),
            "Engineer | Initech\n2021 - Present\n• Cut p99 latency by 40%"
        );
        assert_eq!(
            segmented.get(Section::Certifications),
            "• AWS Solutions Architect (2023)"
        );
    }

    #[test]
    fn test_missing_certifications_header_leaves_others_intact() {
        let text = WELL_FORMED
            .split("CERTIFICATIONS:")
            .next()
            .unwrap()
            .to_string();
        let segmented = segment_response(&text);

        assert_eq!(segmented.get(Section::Certifications), "");
        assert_eq!(segmented.get(Section::Education), "BSc Computer Science");
        assert_eq!(
            segmented.get(Section::Summary),
            "Backend engineer with 4 years of Rust."
        );
    }

    #[test]
    fn test_missing_successor_header_runs_to_end_of_text() {
        let text = WELL_FORMED.replace("EXPERIENCE:\n", "");
        let segmented = segment_response(&text);

        assert_eq!(segmented.get(Section::Experience), "");
        // Without its successor header, skills runs to end of text.
        let skills = segmented.get(Section::Skills);
        assert!(skills.starts_with("Rust, Tokio"));
        assert!(skills.contains("Engineer | Initech"));
        assert!(skills.ends_with("• AWS Solutions Architect (2023)"));
        assert_eq!(
            segmented.get(Section::Projects),
            "Search Engine | Rust\n• Indexed 1M documents"
        );
    }

    #[test]
    fn test_section_runs_to_successor_header() {
        let text = "PROFESSIONAL SUMMARY:\nSum\nSKILLS:\nRust\nEDUCATION:\nMIT\nEXPERIENCE:\nAcme";
        let segmented = segment_response(text);
        assert_eq!(segmented.get(Section::Summary), "Sum");
        assert_eq!(segmented.get(Section::Skills), "Rust\nEDUCATION:\nMIT");
        assert_eq!(segmented.get(Section::Experience), "Acme");
        assert_eq!(segmented.get(Section::Education), "MIT\nEXPERIENCE:\nAcme");
    }

    #[test]
    fn test_out_of_order_headers_only_stop_at_successor() {
        let text = "SKILLS:\nRust\nPROFESSIONAL SUMMARY:\nSummary text\nEDUCATION:\nMIT";
        let segmented = segment_response(text);
        assert_eq!(
            segmented.get(Section::Skills),
            "Rust\nPROFESSIONAL SUMMARY:\nSummary text\nEDUCATION:\nMIT"
        );
        assert_eq!(segmented.get(Section::Summary), "Summary text\nEDUCATION:\nMIT");
        assert_eq!(segmented.get(Section::Education), "MIT");
    }

    #[test]
    fn test_markdown_headers_and_emphasis_are_stripped() {
        let text = "## **PROFESSIONAL SUMMARY**\nBuilt **fast** services in C#\n### SKILLS\nGo";
        let segmented = segment_response(text);
        assert_eq!(
            segmented.get(Section::Summary),
            "Built fast services in C#"
        );
        assert_eq!(segmented.get(Section::Skills), "Go");
    }

    #[test]
    fn test_inline_header_content_and_alias() {
        let text = "TECHNICAL SKILLS: Rust, Go\nEXPERIENCE:\nExperience: 3 years at Initech";
        let segmented = segment_response(text);
        assert_eq!(segmented.get(Section::Skills), "Rust, Go");
        assert_eq!(
            segmented.get(Section::Experience),
            "Experience: 3 years at Initech"
        );
    }

    #[test]
    fn test_repeated_header_stays_in_first_capture() {
        let text = "SKILLS:\nRust\nSKILLS:\nCOBOL\nEXPERIENCE:\nAcme";
        let segmented = segment_response(text);
        assert_eq!(segmented.get(Section::Skills), "Rust\nSKILLS:\nCOBOL");
        assert_eq!(segmented.get(Section::Experience), "Acme");
    }

    #[test]
    fn test_double_underscore_identifiers_survive() {
        let text = "PROJECTS:\nPlugin loader | Python\n• Hooked __init__ and __getattr__";
        let segmented = segment_response(text);
        assert_eq!(
            segmented.get(Section::Projects),
            "Plugin loader | Python\n• Hooked __init__ and __getattr__"
        );
    }

    #[test]
    fn test_normalize_collapses_blank_runs_and_spaces() {
        let text = "line one\n\n\n\n  \nline\t\t two   here\n\n\n";
        assert_eq!(normalize_response(text), "line one\n\nline two here");
    }

    #[test]
    fn test_text_without_headers_yields_nothing() {
        let segmented = segment_response("I cannot help with that request.");
        assert!(segmented.found().is_empty());
    }
}
