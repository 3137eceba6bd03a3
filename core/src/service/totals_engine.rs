//! Keeps the trailing totals block in step with the data rows.
//!
//! Totals are never patched: the block is dropped and rebuilt from the rows
//! every time, so running this twice in a row writes the same bytes.

use tracing::info;

use crate::error::StoreResult;
use crate::model::document::{DocumentState, TimesheetDocument};
use crate::model::totals::Totals;
use crate::repository::DocumentRepository;

/// Marks the document as carrying a totals block and returns the sums that
/// block will show. A document with no rows still gets a block of zeros.
pub fn refresh(doc: &mut TimesheetDocument) -> Totals {
    doc.state = DocumentState::Totaled;
    doc.totals()
}

pub fn recompute<R: DocumentRepository>(repo: &R, name: &str) -> StoreResult<Totals> {
    let mut doc = repo.load(name)?;
    let totals = refresh(&mut doc);
    repo.save(&doc)?;
    info!(
        "{}: totals {} h, {} nights, {} trips over {} rows",
        doc.name,
        totals.total_hours,
        totals.total_nights,
        totals.total_trips,
        doc.rows.len()
    );
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::TimeEntry;

    #[test]
    fn test_refresh_on_empty_document_yields_zero_block() {
        let mut doc = TimesheetDocument::new("Jane", "Acme");
        let totals = refresh(&mut doc);
        assert_eq!(totals, Totals::default());
        assert_eq!(doc.state, DocumentState::Totaled);
        assert!(doc.to_text().contains("Total Hours Worked:           0         \n"));
    }

    #[test]
    fn test_refresh_reflects_current_rows() {
        let mut doc = TimesheetDocument::new("Jane", "Acme");
        doc.push_row(TimeEntry::new("01-05-2024", "08:00-16:00", 8.0, 0, 1)).unwrap();
        assert_eq!(refresh(&mut doc).total_hours, 8.0);

        doc.rows.clear();
        assert_eq!(refresh(&mut doc).total_hours, 0.0);
    }
}
