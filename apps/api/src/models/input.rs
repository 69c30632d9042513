use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::Section;

/// Best-effort fields pulled out of an uploaded resume.
/// Advisory only, never authoritative over what the candidate typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedUpload {
    pub raw_text: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Comma-joined, in extractor vocabulary order.
    pub skills: String,
    pub education: String,
    pub experience: String,
    pub projects: String,
}

/// One candidate submission. Immutable once validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInput {
    // Defaulted so a missing key reaches `validate` and gets a field-specific message.
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub projects: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub certifications: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub extracted: Option<ParsedUpload>,
}

impl RawInput {
    /// Trims the identity fields and rejects the submission if any is blank.
    /// Fields are checked in form order so the first missing one is reported.
    pub fn validate(mut self) -> Result<Self, AppError> {
        let required: [(&str, &mut String); 4] = [
            ("Full name", &mut self.full_name),
            ("Phone number", &mut self.phone),
            ("Email", &mut self.email),
            ("Target job role", &mut self.target_role),
        ];

        for (label, value) in required {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(AppError::Validation(format!("{label} is required")));
            }
            *value = trimmed.to_string();
        }

        Ok(self)
    }

    /// Fills blank optional sections from the uploaded resume, if any.
    /// Anything the candidate typed wins over the upload.
    pub fn merged_with_upload(&self) -> RawInput {
        let mut merged = self.clone();
        let Some(upload) = &self.extracted else {
            return merged;
        };

        for (slot, extracted) in [
            (&mut merged.skills, &upload.skills),
            (&mut merged.education, &upload.education),
            (&mut merged.experience, &upload.experience),
            (&mut merged.projects, &upload.projects),
        ] {
            if slot.trim().is_empty() && !extracted.trim().is_empty() {
                *slot = extracted.trim().to_string();
            }
        }

        merged
    }

    /// The candidate-provided text for a section, if non-blank.
    /// The summary is always generated, so it never has a provided value.
    pub fn provided(&self, section: Section) -> Option<&str> {
        let text = match section {
            Section::Summary => return None,
            Section::Skills => &self.skills,
            Section::Experience => &self.experience,
            Section::Projects => &self.projects,
            Section::Education => &self.education,
            Section::Certifications => &self.certifications,
        };
        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }

    pub fn has_job_description(&self) -> bool {
        !self.job_description.trim().is_empty()
    }
}
