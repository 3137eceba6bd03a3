use crate::error::{StoreError, StoreResult};
use crate::format;
use crate::model::entry::TimeEntry;
use crate::model::totals::Totals;

/// Whether the trailing totals block has been written yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Header only, as left by `create`.
    Empty,
    /// Header, rows and a totals block.
    Totaled,
}

/// In-memory form of one timesheet file. The file is only a persistence
/// format; all edits happen here and are written back whole.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetDocument {
    pub name: String,
    pub title: String,
    pub rows: Vec<TimeEntry>,
    pub state: DocumentState,
}

impl TimesheetDocument {
    pub fn new(name: &str, business_name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: format!("{} Hours - {}", name, business_name),
            rows: Vec::new(),
            state: DocumentState::Empty,
        }
    }

    pub fn from_text(name: &str, text: &str) -> Self {
        format::parse_document(name, text)
    }

    pub fn to_text(&self) -> String {
        format::render_document(self)
    }

    pub fn totals(&self) -> Totals {
        Totals::from_rows(&self.rows)
    }

    pub fn push_row(&mut self, entry: TimeEntry) -> StoreResult<()> {
        entry.validate()?;
        self.rows.push(entry);
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> StoreResult<TimeEntry> {
        self.check_index(index)?;
        Ok(self.rows.remove(index))
    }

    pub fn replace_row(&mut self, index: usize, entry: TimeEntry) -> StoreResult<TimeEntry> {
        self.check_index(index)?;
        entry.validate()?;
        Ok(std::mem::replace(&mut self.rows[index], entry))
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.rows.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(())
    }
}
