// Resume generation: prompt → service (bounded retry) → segment → repair.
// All service calls go through llm_client; the fallback path never touches the network.

pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod segmenter;

pub use generator::{ContentGenerator, GenerationOutcome, GenerationSource};
