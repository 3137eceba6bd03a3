pub mod file;
pub mod traits;

// Re-export
pub use file::{document_stem, validate_name, FileDocumentRepository, DOCUMENT_SUFFIX};
pub use traits::{DocumentNames, DocumentRepository};
