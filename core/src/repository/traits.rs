use crate::error::StoreResult;
use crate::model::document::TimesheetDocument;

/// Lazily produced document identifiers. Finite; ask the repository again to
/// start over.
pub type DocumentNames = Box<dyn Iterator<Item = String>>;

pub trait DocumentRepository {
    /// Persists a brand-new document. Must not touch an existing one.
    fn create(&self, doc: &TimesheetDocument) -> StoreResult<()>;
    fn load(&self, name: &str) -> StoreResult<TimesheetDocument>;
    /// Replaces the whole stored document.
    fn save(&self, doc: &TimesheetDocument) -> StoreResult<()>;
    fn list(&self) -> StoreResult<DocumentNames>;
}
