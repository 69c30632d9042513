//! Section Extractor: pattern matching over the plain text of an uploaded
//! resume. Best effort only; the output is advisory and never overrides what
//! the candidate typed.

use regex::Regex;
use tracing::debug;

use crate::models::ParsedUpload;

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";
const PHONE_PATTERN: &str = r"[+(]?[1-9][0-9 .\-()]{8,}[0-9]";

/// Skill tokens recognised in uploads, in output order.
pub const SKILL_VOCABULARY: [&str; 18] = [
    "python",
    "java",
    "javascript",
    "react",
    "node.js",
    "sql",
    "mysql",
    "mongodb",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "html",
    "css",
    "machine learning",
    "data science",
    "tensorflow",
    "pytorch",
];

const EDUCATION_KEYWORDS: &[&str] = &["education", "academic"];
const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "work history", "employment"];
const PROJECT_KEYWORDS: &[&str] = &["projects", "personal projects"];

/// Compiled patterns for contact details. Build once at startup and share.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    email: Regex,
    phone: Regex,
}

impl SectionExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
        })
    }

    /// Parses resume text. Returns `None` only when there is no text at all.
    pub fn extract(&self, raw_text: &str) -> Option<ParsedUpload> {
        if raw_text.trim().is_empty() {
            return None;
        }

        let parsed = ParsedUpload {
            raw_text: raw_text.to_string(),
            email: self.email.find(raw_text).map(|m| m.as_str().to_string()),
            phone: self.phone.find(raw_text).map(|m| m.as_str().to_string()),
            skills: extract_skills(raw_text),
            education: extract_section(raw_text, EDUCATION_KEYWORDS),
            experience: extract_section(raw_text, EXPERIENCE_KEYWORDS),
            projects: extract_section(raw_text, PROJECT_KEYWORDS),
        };

        debug!(
            "Extracted upload: email={} phone={} skills='{}' education={}B experience={}B projects={}B",
            parsed.email.is_some(),
            parsed.phone.is_some(),
            parsed.skills,
            parsed.education.len(),
            parsed.experience.len(),
            parsed.projects.len()
        );

        Some(parsed)
    }
}

/// Vocabulary skills mentioned anywhere in the text, comma-joined.
pub fn extract_skills(text: &str) -> String {
    let lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(*skill))
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lines under the first header containing one of `keywords`, up to the next
/// all-caps heading. Lines that mention a keyword again are treated as headers
/// and skipped.
pub fn extract_section(text: &str, keywords: &[&str]) -> String {
    let mut captured: Vec<&str> = Vec::new();
    let mut capturing = false;

    for line in text.lines() {
        let lower = line.to_lowercase();
        if keywords.iter().any(|k| lower.contains(k)) {
            capturing = true;
            continue;
        }

        if !capturing {
            continue;
        }
        if is_heading(line) {
            break;
        }
        if !line.trim().is_empty() {
            captured.push(line);
        }
    }

    captured.join("\n")
}

/// An all-caps line longer than three characters, e.g. "SKILLS".
fn is_heading(line: &str) -> bool {
    line.chars().count() > 3
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "JANE DOE
jane.doe@example.com | +1 (555) 123-4567

EDUCATION
BSc Computer Science, MIT
2016 - 2020

EXPERIENCE
Backend Engineer at Initech
Built Python and Docker services on AWS

PROJECTS
Chess engine in Java

SKILLS
python, sql";

    fn extractor() -> SectionExtractor {
        SectionExtractor::new().unwrap()
    }

    #[test]
    fn test_blank_text_yields_none() {
        assert!(extractor().extract("").is_none());
        assert!(extractor().extract(" \n\t ").is_none());
    }

    #[test]
    fn test_contact_details_are_found() {
        let parsed = extractor().extract(SAMPLE).unwrap();
        assert_eq!(parsed.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(parsed.phone.as_deref(), Some("+1 (555) 123-4567"));
        assert_eq!(parsed.raw_text, SAMPLE);
    }

    #[test]
    fn test_missing_contact_details_are_none() {
        let parsed = extractor().extract("Just some prose about nothing.").unwrap();
        assert!(parsed.email.is_none());
        assert!(parsed.phone.is_none());
    }

    #[test]
    fn test_skills_follow_vocabulary_order() {
        let parsed = extractor().extract(SAMPLE).unwrap();
        assert_eq!(parsed.skills, "python, java, sql, aws, docker");
    }

    #[test]
    fn test_sections_stop_at_next_heading() {
        let parsed = extractor().extract(SAMPLE).unwrap();
        assert_eq!(parsed.education, "BSc Computer Science, MIT\n2016 - 2020");
        assert_eq!(
            parsed.experience,
            "Backend Engineer at Initech\nBuilt Python and Docker services on AWS"
        );
        assert_eq!(parsed.projects, "Chess engine in Java");
    }

    #[test]
    fn test_short_caps_line_does_not_end_section() {
        let text = "Work History\nAcme Corp\nAWS\nShipped billing\nREFERENCES\nOn request";
        assert_eq!(
            extract_section(text, EXPERIENCE_KEYWORDS),
            "Acme Corp\nAWS\nShipped billing"
        );
    }

    #[test]
    fn test_section_without_header_is_empty() {
        assert_eq!(extract_section("Nothing relevant here", PROJECT_KEYWORDS), "");
    }
}
