use serde::{Deserialize, Serialize};

use crate::models::input::RawInput;

/// One of the six canonical resume content blocks, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    Certifications,
}

impl Section {
    /// Canonical order. Prompt headers, segmentation and rendering all follow it.
    pub const ALL: [Section; 6] = [
        Section::Summary,
        Section::Skills,
        Section::Experience,
        Section::Projects,
        Section::Education,
        Section::Certifications,
    ];

    /// The section that follows this one in canonical order.
    pub fn next(self) -> Option<Section> {
        let pos = Section::ALL.iter().position(|s| *s == self)?;
        Section::ALL.get(pos + 1).copied()
    }

    /// Literal header the generation prompt mandates for this section.
    pub fn header(self) -> &'static str {
        match self {
            Section::Summary => "PROFESSIONAL SUMMARY",
            Section::Skills => "SKILLS",
            Section::Experience => "EXPERIENCE",
            Section::Projects => "PROJECTS",
            Section::Education => "EDUCATION",
            Section::Certifications => "CERTIFICATIONS",
        }
    }

    /// Heading used in rendered documents.
    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "Professional Summary",
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Certifications => "Certifications & Achievements",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Education => "education",
            Section::Certifications => "certifications",
        }
    }
}

/// The canonical structured resume. Identity fields are copied verbatim from
/// the submission; the six content sections are never empty once the
/// generator hands the record out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub target_role: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub projects: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub certifications: String,
}

impl Resume {
    /// An empty resume carrying only the candidate's identity.
    pub fn for_candidate(input: &RawInput) -> Self {
        Self {
            name: input.full_name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            target_role: input.target_role.clone(),
            ..Self::default()
        }
    }

    pub fn section(&self, section: Section) -> &str {
        match section {
            Section::Summary => &self.summary,
            Section::Skills => &self.skills,
            Section::Experience => &self.experience,
            Section::Projects => &self.projects,
            Section::Education => &self.education,
            Section::Certifications => &self.certifications,
        }
    }

    pub fn set_section(&mut self, section: Section, text: String) {
        let slot = match section {
            Section::Summary => &mut self.summary,
            Section::Skills => &mut self.skills,
            Section::Experience => &mut self.experience,
            Section::Projects => &mut self.projects,
            Section::Education => &mut self.education,
            Section::Certifications => &mut self.certifications,
        };
        *slot = text;
    }

    /// Sections in canonical order, paired with their text.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        Section::ALL.into_iter().map(move |s| (s, self.section(s)))
    }

    /// Sections whose text is empty or whitespace-only.
    pub fn empty_sections(&self) -> Vec<Section> {
        self.sections()
            .filter(|(_, text)| text.trim().is_empty())
            .map(|(s, _)| s)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.empty_sections().is_empty()
    }
}
