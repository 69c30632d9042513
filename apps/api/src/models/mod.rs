pub mod input;
pub mod resume;
pub mod score;

pub use input::{ParsedUpload, RawInput};
pub use resume::{Resume, Section};
pub use score::Score;
