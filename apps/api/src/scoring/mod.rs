// ATS scoring: four 0–25 sub-scores over a finished resume.
// Keyword heuristics only, no model calls.

pub mod ats;
pub mod handlers;
pub mod vocabulary;

pub use ats::{AtsScorer, KeywordAtsScorer};
