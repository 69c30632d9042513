//! Content Generator: builds the structured resume for one submission.
//!
//! Flow: merge upload → build prompt → call service (bounded retry) →
//!       segment response → repair empty sections → Resume.
//!
//! Total by construction: every failure path ends in the deterministic
//! fallback, so callers always receive a complete resume.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::generation::fallback::{build_fallback_resume, synthesize_section};
use crate::generation::prompts::build_generation_prompt;
use crate::generation::segmenter::segment_response;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::{RawInput, Resume, Section};

/// Service calls per submission, including the first.
pub const MAX_GENERATION_ATTEMPTS: u32 = 3;
/// Responses shorter than this are treated as failed attempts.
pub const MIN_RESPONSE_CHARS: usize = 100;
/// Fixed pause between attempts unless overridden.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Where the bulk of a resume's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationSource {
    /// A service response was accepted and segmented.
    Service,
    /// Deterministic templates only.
    Fallback,
}

/// A finished resume plus how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub resume: Resume,
    pub source: GenerationSource,
    /// Sections the service response did not supply.
    pub repaired_sections: Vec<Section>,
    /// Service calls made (0 when no service is configured).
    pub attempts: u32,
}

/// Why a single service attempt was discarded.
#[derive(Debug)]
enum AttemptRejection {
    Call(LlmError),
    Empty,
    TooShort(usize),
}

impl std::fmt::Display for AttemptRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptRejection::Call(e) => write!(f, "call failed: {e}"),
            AttemptRejection::Empty => write!(f, "empty response"),
            AttemptRejection::TooShort(len) => {
                write!(f, "response too short ({len} < {MIN_RESPONSE_CHARS} chars)")
            }
        }
    }
}

/// Result of the retry loop.
enum TransportResult {
    Accepted { text: String, attempts: u32 },
    Exhausted { attempts: u32 },
    Cancelled { attempts: u32 },
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

/// Resume generator with an optional injected text service.
///
/// Cheap to clone; the service handle is shared.
#[derive(Clone)]
pub struct ContentGenerator {
    service: Option<Arc<dyn TextGenerator>>,
    retry_delay: Duration,
}

impl ContentGenerator {
    pub fn new(service: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            service,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Fallback-only generator. Never touches the network.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn has_service(&self) -> bool {
        self.service.is_some()
    }

    /// Generates a complete resume. Never fails.
    pub async fn generate(&self, input: &RawInput) -> Resume {
        self.generate_with_cancel(input, CancellationToken::new())
            .await
            .resume
    }

    /// Generates a complete resume, abandoning the service as soon as `cancel`
    /// fires. A cancelled generation still returns a full fallback resume.
    pub async fn generate_with_cancel(
        &self,
        input: &RawInput,
        cancel: CancellationToken,
    ) -> GenerationOutcome {
        let input = input.merged_with_upload();

        let Some(service) = &self.service else {
            info!(
                "No text service configured, using fallback for role '{}'",
                input.target_role
            );
            return fallback_outcome(&input, 0);
        };

        let prompt = build_generation_prompt(&input);
        debug!("Generation prompt built ({} chars)", prompt.len());

        match self.call_with_retry(service.as_ref(), &prompt, &cancel).await {
            TransportResult::Accepted { text, attempts } => {
                info!(
                    "Service response accepted after {attempts} attempt(s) ({} chars, model {})",
                    text.chars().count(),
                    service.model()
                );
                let (resume, repaired_sections) = assemble_resume(&text, &input);
                GenerationOutcome {
                    resume,
                    source: GenerationSource::Service,
                    repaired_sections,
                    attempts,
                }
            }
            TransportResult::Exhausted { attempts } => {
                warn!("All {attempts} generation attempts failed, using fallback");
                fallback_outcome(&input, attempts)
            }
            TransportResult::Cancelled { attempts } => {
                warn!("Generation cancelled after {attempts} attempt(s), using fallback");
                fallback_outcome(&input, attempts)
            }
        }
    }

    /// Sequential retry loop. Same prompt every attempt; only the call is redone.
    async fn call_with_retry(
        &self,
        service: &dyn TextGenerator,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> TransportResult {
        let mut attempts = 0;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            if attempt > 1 {
                tokio::select! {
                    _ = cancel.cancelled() => return TransportResult::Cancelled { attempts },
                    _ = tokio::time::sleep(self.retry_delay) => {}
                }
            }

            attempts = attempt;
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return TransportResult::Cancelled { attempts },
                result = service.generate_text(prompt) => result,
            };

            match accept_response(result) {
                Ok(text) => return TransportResult::Accepted { text, attempts },
                Err(rejection) => warn!(
                    "Generation attempt {attempt}/{MAX_GENERATION_ATTEMPTS} rejected: {rejection}"
                ),
            }
        }

        TransportResult::Exhausted { attempts }
    }
}

fn accept_response(result: Result<String, LlmError>) -> Result<String, AttemptRejection> {
    let text = result.map_err(AttemptRejection::Call)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AttemptRejection::Empty);
    }
    let len = trimmed.chars().count();
    if len < MIN_RESPONSE_CHARS {
        return Err(AttemptRejection::TooShort(len));
    }
    Ok(text)
}

fn fallback_outcome(input: &RawInput, attempts: u32) -> GenerationOutcome {
    GenerationOutcome {
        resume: build_fallback_resume(input),
        source: GenerationSource::Fallback,
        repaired_sections: Vec::new(),
        attempts,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Segmentation + repair
// ────────────────────────────────────────────────────────────────────────────

/// Segments an accepted response into a resume and repairs any gaps.
fn assemble_resume(text: &str, input: &RawInput) -> (Resume, Vec<Section>) {
    let segmented = segment_response(text);
    debug!("Segmented sections: {:?}", segmented.found());
    let mut resume = Resume::for_candidate(input);

    for section in Section::ALL {
        let captured = segmented.get(section);
        if captured.is_empty() {
            warn!("Could not extract {} from service response", section.key());
        } else {
            debug!("Extracted {}: {} chars", section.key(), captured.len());
        }
        resume.set_section(section, captured.to_string());
    }

    let repaired = repair_resume(&mut resume, input);
    (resume, repaired)
}

/// Fills every empty section: candidate text first, synthesized default second.
/// Returns the sections that needed repair, in canonical order.
pub fn repair_resume(resume: &mut Resume, input: &RawInput) -> Vec<Section> {
    let missing = resume.empty_sections();

    for &section in &missing {
        let text = match input.provided(section) {
            Some(user) => {
                info!("Using submitted {} text", section.key());
                user.to_string()
            }
            None => {
                info!("Generated default {}", section.key());
                synthesize_section(section, input)
            }
        };
        resume.set_section(section, text);
    }

    missing
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::generation::fallback::default_certifications;
    use crate::models::ParsedUpload;

    /// Replays canned results in order; repeats the last one when exhausted.
    struct ScriptedService {
        responses: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: AtomicU32,
    }

    impl ScriptedService {
        fn new(responses: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedService {
        async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            match responses.pop_front() {
                Some(next) => next,
                None => Err(LlmError::EmptyContent),
            }
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    /// Never answers; only cancellation gets past it.
    struct HangingService;

    #[async_trait]
    impl TextGenerator for HangingService {
        async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
            std::future::pending::<()>().await;
            Err(LlmError::EmptyContent)
        }

        fn model(&self) -> &str {
            "hanging"
        }
    }

    const FULL_RESPONSE: &str = "PROFESSIONAL SUMMARY:
Software Engineer with three years building distributed Rust services.

SKILLS:
Rust, Tokio, PostgreSQL, Docker, Kubernetes

EXPERIENCE:
Software Engineer | Initech
2021 - Present
* Reduced API latency by 40% by rewriting the hot path in Rust

PROJECTS:
Log Search | Rust, Tantivy
* Indexed 10M log lines per day

EDUCATION:
BSc Computer Science, State University

CERTIFICATIONS:
* CKA - Cloud Native Computing Foundation (2023)";

    fn input() -> RawInput {
        RawInput {
            full_name: "Ada Lovelace".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            email: "ada@example.com".to_string(),
            target_role: "Software Engineer".to_string(),
            ..RawInput::default()
        }
    }

    fn generator(service: Arc<dyn TextGenerator>) -> ContentGenerator {
        ContentGenerator::new(Some(service)).with_retry_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_offline_generator_returns_complete_fallback() {
        let outcome = ContentGenerator::offline()
            .generate_with_cancel(&input(), CancellationToken::new())
            .await;
        assert_eq!(outcome.source, GenerationSource::Fallback);
        assert_eq!(outcome.attempts, 0);
        assert!(outcome.resume.is_complete());
        assert_eq!(outcome.resume.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_offline_generation_is_deterministic() {
        let generator = ContentGenerator::offline();
        let first = generator.generate(&input()).await;
        let second = generator.generate(&input()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_accepted_response_is_segmented() {
        let service = ScriptedService::new(vec![Ok(FULL_RESPONSE.to_string())]);
        let outcome = generator(service.clone())
            .generate_with_cancel(&input(), CancellationToken::new())
            .await;

        assert_eq!(outcome.source, GenerationSource::Service);
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.repaired_sections.is_empty());
        assert_eq!(
            outcome.resume.skills,
            "Rust, Tokio, PostgreSQL, Docker, Kubernetes"
        );
        assert!(outcome.resume.experience.contains("• Reduced API latency"));
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_short_responses_exhaust_three_attempts() {
        let service = ScriptedService::new(vec![
            Ok("too short".to_string()),
            Ok(String::new()),
            Ok("still too short".to_string()),
        ]);
        let outcome = generator(service.clone())
            .generate_with_cancel(&input(), CancellationToken::new())
            .await;

        assert_eq!(service.calls(), MAX_GENERATION_ATTEMPTS);
        assert_eq!(outcome.attempts, MAX_GENERATION_ATTEMPTS);
        assert_eq!(outcome.source, GenerationSource::Fallback);
        assert!(outcome.resume.is_complete());
    }

    #[tokio::test]
    async fn test_retry_recovers_after_transient_error() {
        let service = ScriptedService::new(vec![
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
            Ok(FULL_RESPONSE.to_string()),
        ]);
        let outcome = generator(service.clone())
            .generate_with_cancel(&input(), CancellationToken::new())
            .await;

        assert_eq!(outcome.source, GenerationSource::Service);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_waits_fixed_delay_between_attempts() {
        let service = ScriptedService::new(vec![]);
        let generator = ContentGenerator::new(Some(service.clone() as Arc<dyn TextGenerator>));

        let started = tokio::time::Instant::now();
        let outcome = generator
            .generate_with_cancel(&input(), CancellationToken::new())
            .await;

        assert_eq!(outcome.attempts, 3);
        assert_eq!(started.elapsed(), DEFAULT_RETRY_DELAY * 2);
    }

    #[tokio::test]
    async fn test_missing_certifications_header_is_repaired() {
        let truncated = FULL_RESPONSE
            .split("CERTIFICATIONS:")
            .next()
            .unwrap()
            .to_string();
        let service = ScriptedService::new(vec![Ok(truncated)]);
        let outcome = generator(service)
            .generate_with_cancel(&input(), CancellationToken::new())
            .await;

        assert_eq!(outcome.source, GenerationSource::Service);
        assert_eq!(outcome.repaired_sections, vec![Section::Certifications]);
        assert_eq!(
            outcome.resume.certifications,
            default_certifications("Software Engineer")
        );
        assert_eq!(
            outcome.resume.education,
            "BSc Computer Science, State University"
        );
        assert!(outcome.resume.is_complete());
    }

    #[tokio::test]
    async fn test_repair_prefers_submitted_text_over_default() {
        let submission = RawInput {
            certifications: "Oracle Certified Java Programmer".to_string(),
            ..input()
        };
        let mut resume = Resume::for_candidate(&submission);
        resume.summary = "Existing summary".to_string();

        let repaired = repair_resume(&mut resume, &submission);

        assert!(!repaired.contains(&Section::Summary));
        assert_eq!(resume.summary, "Existing summary");
        assert_eq!(resume.certifications, "Oracle Certified Java Programmer");
        assert!(resume.is_complete());
    }

    #[tokio::test]
    async fn test_unstructured_response_is_fully_repaired() {
        let rambling = "I'm sorry, but I can only offer general advice here. ".repeat(5);
        let service = ScriptedService::new(vec![Ok(rambling)]);
        let outcome = generator(service)
            .generate_with_cancel(&input(), CancellationToken::new())
            .await;

        assert_eq!(outcome.repaired_sections, Section::ALL.to_vec());
        assert!(outcome.resume.is_complete());
    }

    #[tokio::test]
    async fn test_cancellation_yields_complete_fallback() {
        let cancel = CancellationToken::new();
        let generator = generator(Arc::new(HangingService));

        let task = {
            let cancel = cancel.clone();
            let generator = generator.clone();
            tokio::spawn(async move { generator.generate_with_cancel(&input(), cancel).await })
        };
        cancel.cancel();

        let outcome = task.await.unwrap();
        assert_eq!(outcome.source, GenerationSource::Fallback);
        assert!(outcome.resume.is_complete());
    }

    #[tokio::test]
    async fn test_upload_fills_blank_sections_before_generation() {
        let submission = RawInput {
            extracted: Some(ParsedUpload {
                experience: "Site Reliability Engineer at Hooli, 2019-2023".to_string(),
                ..ParsedUpload::default()
            }),
            ..input()
        };
        let resume = ContentGenerator::offline().generate(&submission).await;
        assert_eq!(
            resume.experience,
            "Site Reliability Engineer at Hooli, 2019-2023"
        );
    }
}
