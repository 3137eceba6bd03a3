use tracing::info;

use crate::error::StoreResult;
use crate::model::document::TimesheetDocument;
use crate::model::entry::TimeEntry;
use crate::model::totals::Totals;
use crate::repository::{validate_name, DocumentNames, DocumentRepository};
use crate::service::totals_engine;

/// Record store operations for the presentation layer. Every call loads the
/// document, works on it in memory, and writes it back in one pass.
pub struct TimesheetService<R: DocumentRepository> {
    repo: R,
    business_name: String,
}

impl<R: DocumentRepository> TimesheetService<R> {
    pub fn new(repo: R, business_name: impl Into<String>) -> Self {
        Self {
            repo,
            business_name: business_name.into(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn create(&self, name: &str) -> StoreResult<TimesheetDocument> {
        let name = validate_name(name)?;
        let doc = TimesheetDocument::new(name, &self.business_name);
        self.repo.create(&doc)?;
        info!("created document {}", name);
        Ok(doc)
    }

    pub fn list_documents(&self) -> StoreResult<DocumentNames> {
        self.repo.list()
    }

    pub fn load(&self, name: &str) -> StoreResult<TimesheetDocument> {
        self.repo.load(name)
    }

    pub fn load_rows(&self, name: &str) -> StoreResult<Vec<TimeEntry>> {
        Ok(self.repo.load(name)?.rows)
    }

    pub fn add_row(&self, name: &str, entry: TimeEntry) -> StoreResult<TimesheetDocument> {
        entry.validate()?;
        let doc = self.mutate(name, |doc| doc.push_row(entry))?;
        info!("{}: added row {}", doc.name, doc.rows.len() - 1);
        Ok(doc)
    }

    pub fn remove_row(&self, name: &str, index: usize) -> StoreResult<TimesheetDocument> {
        let doc = self.mutate(name, |doc| doc.remove_row(index).map(|_| ()))?;
        info!("{}: removed row {}", doc.name, index);
        Ok(doc)
    }

    pub fn replace_row(
        &self,
        name: &str,
        index: usize,
        entry: TimeEntry,
    ) -> StoreResult<TimesheetDocument> {
        entry.validate()?;
        let doc = self.mutate(name, |doc| doc.replace_row(index, entry).map(|_| ()))?;
        info!("{}: replaced row {}", doc.name, index);
        Ok(doc)
    }

    /// Rebuilds the totals block from the rows on disk. Mutating operations
    /// already do this; it is exposed for tests and manual repair.
    pub fn recompute(&self, name: &str) -> StoreResult<Totals> {
        totals_engine::recompute(&self.repo, name)
    }

    /// Load, edit, refresh totals, save. Nothing is written when `edit` fails.
    fn mutate<F>(&self, name: &str, edit: F) -> StoreResult<TimesheetDocument>
    where
        F: FnOnce(&mut TimesheetDocument) -> StoreResult<()>,
    {
        let mut doc = self.repo.load(name)?;
        edit(&mut doc)?;
        totals_engine::refresh(&mut doc);
        self.repo.save(&doc)?;
        Ok(doc)
    }
}
