//! ATS Scorer: pluggable, trait-based scorer that rates a resume against a
//! job description and target role.
//!
//! Default: `KeywordAtsScorer` (pure-Rust, deterministic, no I/O).
//! `AppState` holds an `Arc<dyn AtsScorer>`.
//!
//! Every sub-score is rounded before it is summed, so `total` is always the
//! exact sum of the four parts.

use std::collections::{HashMap, HashSet};

use crate::models::score::MAX_SUB_SCORE;
use crate::models::{Resume, Score};
use crate::scoring::vocabulary::{
    role_keywords, JD_SKILL_VOCABULARY, MIN_KEYWORD_CHARS, STOP_WORDS, TOP_KEYWORDS,
};

/// Sub-score used when there is nothing to compare against.
pub const DEFAULT_SUB_SCORE: u32 = 20;
/// Points per formatting check.
const FORMATTING_POINTS: u32 = 5;

/// The scorer trait. Implement this to swap backends without touching the
/// handlers.
pub trait AtsScorer: Send + Sync {
    fn score(&self, resume: &Resume, job_description: &str, target_role: &str) -> Score;
}

/// Keyword and vocabulary overlap scorer.
///
/// 1. skill match: share of JD vocabulary skills listed in the resume skills
/// 2. keyword relevance: share of the top JD words present in the resume text
/// 3. role alignment: share of the role family's vocabulary present
/// 4. formatting: +5 per standard section or complete contact block
pub struct KeywordAtsScorer;

impl AtsScorer for KeywordAtsScorer {
    fn score(&self, resume: &Resume, job_description: &str, target_role: &str) -> Score {
        compute_ats_score(resume, job_description, target_role)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_ats_score(resume: &Resume, job_description: &str, target_role: &str) -> Score {
    let skill = skill_match_score(resume, job_description);
    let keyword = keyword_relevance_score(resume, job_description);
    let role = role_alignment_score(resume, target_role);
    let formatting = formatting_score(resume);

    let total = skill + keyword + role + formatting;
    let explanation = explain(total, skill, keyword, role, formatting);

    Score::new(skill, keyword, role, formatting, explanation)
}

/// `matched / total` of 25 points, rounded half away from zero.
fn proportional(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let points = MAX_SUB_SCORE as f64 * matched as f64 / total as f64;
    (points.round() as u32).min(MAX_SUB_SCORE)
}

fn skill_match_score(resume: &Resume, job_description: &str) -> u32 {
    if job_description.trim().is_empty() {
        return DEFAULT_SUB_SCORE;
    }

    let jd_skills = jd_skills(job_description);
    if jd_skills.is_empty() {
        return DEFAULT_SUB_SCORE;
    }

    let resume_skills = split_skills(&resume.skills);
    let matched = jd_skills
        .iter()
        .filter(|skill| resume_skills.contains(**skill))
        .count();

    proportional(matched, jd_skills.len())
}

fn keyword_relevance_score(resume: &Resume, job_description: &str) -> u32 {
    if job_description.trim().is_empty() {
        return DEFAULT_SUB_SCORE;
    }

    let resume_text = [
        resume.summary.as_str(),
        resume.skills.as_str(),
        resume.experience.as_str(),
        resume.projects.as_str(),
    ]
    .join(" ")
    .to_lowercase();

    let keywords = extract_keywords(job_description);
    let present = keywords
        .iter()
        .filter(|k| resume_text.contains(k.as_str()))
        .count();

    proportional(present, keywords.len())
}

fn role_alignment_score(resume: &Resume, target_role: &str) -> u32 {
    let Some(expected) = role_keywords(target_role) else {
        return DEFAULT_SUB_SCORE;
    };

    let text = [
        resume.summary.as_str(),
        resume.experience.as_str(),
        resume.projects.as_str(),
    ]
    .join(" ")
    .to_lowercase();

    let matched = expected.iter().filter(|k| text.contains(**k)).count();
    proportional(matched, expected.len())
}

fn formatting_score(resume: &Resume) -> u32 {
    let present = |s: &str| !s.trim().is_empty();

    let checks = [
        present(&resume.summary),
        present(&resume.skills),
        present(&resume.experience) || present(&resume.projects),
        present(&resume.education),
        present(&resume.name) && present(&resume.email) && present(&resume.phone),
    ];

    let passed = checks.iter().filter(|ok| **ok).count() as u32;
    (passed * FORMATTING_POINTS).min(MAX_SUB_SCORE)
}

// ────────────────────────────────────────────────────────────────────────────
// Term extraction
// ────────────────────────────────────────────────────────────────────────────

/// Resume skills as a lowercased set, split on `,` `;` `|` and newlines.
pub fn split_skills(skills: &str) -> HashSet<String> {
    skills
        .split([',', ';', '|', '\n'])
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Vocabulary skills mentioned in a job description, in vocabulary order.
pub fn jd_skills(job_description: &str) -> Vec<&'static str> {
    let lower = job_description.to_lowercase();
    JD_SKILL_VOCABULARY
        .iter()
        .copied()
        .filter(|skill| lower.contains(skill))
        .collect()
}

/// The most frequent meaningful words of a text, most frequent first.
/// Ties keep first-occurrence order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for word in lower.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if word.chars().count() <= MIN_KEYWORD_CHARS || STOP_WORDS.contains(&word) {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    // Stable sort keeps first-occurrence order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Explanation
// ────────────────────────────────────────────────────────────────────────────

pub fn explain(total: u32, skill: u32, keyword: u32, role: u32, formatting: u32) -> String {
    let mut lines = Vec::new();

    lines.push(if total >= 80 {
        "Excellent! Your resume is highly optimized for ATS."
    } else if total >= 60 {
        "Good resume, but there's room for improvement."
    } else {
        "Your resume needs significant optimization for ATS."
    });

    if skill < 15 {
        lines.push("• Add more relevant technical skills matching the job description.");
    }
    if keyword < 15 {
        lines.push("• Incorporate more keywords from the job description naturally.");
    }
    if role < 15 {
        lines.push("• Better align your experience with the target role requirements.");
    }
    if formatting < 20 {
        lines.push(
            "• Ensure all standard sections are included (Summary, Skills, Experience, Education).",
        );
    }
    if total >= 80 {
        lines.push("Your resume should pass most ATS systems successfully!");
    }

    lines.join("\n")
}
