use std::sync::Arc;

use crate::config::Config;
use crate::extraction::SectionExtractor;
use crate::generation::ContentGenerator;
use crate::scoring::AtsScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the optional text service. Without one every request takes the fallback path.
    pub generator: ContentGenerator,
    /// Pluggable scorer. Default: KeywordAtsScorer.
    pub scorer: Arc<dyn AtsScorer>,
    pub extractor: Arc<SectionExtractor>,
    pub config: Config,
}
