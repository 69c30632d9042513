use serde::{Deserialize, Serialize};

/// Upper bound of each sub-score.
pub const MAX_SUB_SCORE: u32 = 25;

/// ATS score for one (resume, job description, target role) triple.
/// `total` is always the sum of the four sub-scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub total: u32,
    pub skill_match: u32,
    pub keyword_relevance: u32,
    pub role_alignment: u32,
    pub formatting: u32,
    pub explanation: String,
}

impl Score {
    /// Builds a score from already-rounded sub-scores, clamping each to 0–25.
    pub fn new(
        skill_match: u32,
        keyword_relevance: u32,
        role_alignment: u32,
        formatting: u32,
        explanation: String,
    ) -> Self {
        let skill_match = skill_match.min(MAX_SUB_SCORE);
        let keyword_relevance = keyword_relevance.min(MAX_SUB_SCORE);
        let role_alignment = role_alignment.min(MAX_SUB_SCORE);
        let formatting = formatting.min(MAX_SUB_SCORE);

        Self {
            total: skill_match + keyword_relevance + role_alignment + formatting,
            skill_match,
            keyword_relevance,
            role_alignment,
            formatting,
            explanation,
        }
    }
}
