// Upload ingestion: raw bytes → plain text → best-effort ParsedUpload.
// Nothing in this module fails a request; every problem degrades to "no upload".

pub mod handlers;
pub mod sections;
pub mod upload;

pub use sections::SectionExtractor;
