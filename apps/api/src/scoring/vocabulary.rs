//! Static term tables for the keyword scorer.

/// Skills looked for in job descriptions, matched by substring.
pub const JD_SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "django",
    "flask",
    "spring boot",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "git",
    "ci/cd",
    "jenkins",
    "terraform",
    "machine learning",
    "deep learning",
    "tensorflow",
    "pytorch",
    "html",
    "css",
    "typescript",
    "rest api",
    "graphql",
    "agile",
    "scrum",
    "jira",
    "figma",
    "adobe xd",
];

/// Words never counted as job description keywords.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "is",
    "was", "are", "were", "been", "be", "have", "has",
];

/// Keywords must be longer than this many characters.
pub const MIN_KEYWORD_CHARS: usize = 3;

/// How many of the most frequent job description words are checked.
pub const TOP_KEYWORDS: usize = 30;

/// Role family → expected vocabulary. The first family whose name appears in
/// the lowercased target role is used.
pub const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "software engineer",
        &[
            "development",
            "programming",
            "coding",
            "software",
            "engineer",
            "python",
            "java",
        ],
    ),
    (
        "data scientist",
        &[
            "data",
            "analysis",
            "machine learning",
            "python",
            "statistics",
            "modeling",
        ],
    ),
    (
        "product manager",
        &["product", "strategy", "roadmap", "stakeholder", "agile", "scrum"],
    ),
    (
        "designer",
        &["design", "ui", "ux", "figma", "adobe", "creative", "user experience"],
    ),
    (
        "marketing",
        &["marketing", "campaign", "seo", "content", "analytics", "social media"],
    ),
];

/// Expected vocabulary for a target role, if it belongs to a known family.
pub fn role_keywords(target_role: &str) -> Option<&'static [&'static str]> {
    let role = target_role.to_lowercase();
    ROLE_KEYWORDS
        .iter()
        .find(|(family, _)| role.contains(family))
        .map(|(_, keywords)| *keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_lookup_is_substring_and_case_insensitive() {
        assert_eq!(role_keywords("Senior Software Engineer II").map(|k| k.len()), Some(7));
        assert!(role_keywords("Growth Marketing Lead").is_some());
        assert!(role_keywords("Chef").is_none());
    }
}
