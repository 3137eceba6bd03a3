use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::format::TOTALS_MARKER;

/// One recorded work session, i.e. one data row of a timesheet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeEntry {
    /// `MM-DD-YYYY`, supplied pre-formatted by the date picker.
    pub date: String,
    /// Free-form, e.g. `08:00-16:00`. Never parsed.
    pub time_range: String,
    pub hours_worked: f64,
    pub nights_on_call: u32,
    pub trips_made: u32,
}

impl TimeEntry {
    pub fn new(
        date: impl Into<String>,
        time_range: impl Into<String>,
        hours_worked: f64,
        nights_on_call: u32,
        trips_made: u32,
    ) -> Self {
        Self {
            date: date.into(),
            time_range: time_range.into(),
            hours_worked,
            nights_on_call,
            trips_made,
        }
    }

    /// Rejects entries that would not survive a write/read cycle through the
    /// whitespace-split row format.
    pub fn validate(&self) -> StoreResult<()> {
        check_text_field("date", &self.date)?;
        check_text_field("time range", &self.time_range)?;

        // A row starting with the marker would be read back as the totals block.
        if self.date.starts_with(TOTALS_MARKER) {
            return Err(StoreError::InvalidEntry(format!(
                "date must not start with '{}'",
                TOTALS_MARKER
            )));
        }

        if !self.hours_worked.is_finite() || self.hours_worked < 0.0 {
            return Err(StoreError::InvalidEntry(format!(
                "hours worked must be a non-negative number, got {}",
                self.hours_worked
            )));
        }

        Ok(())
    }
}

fn check_text_field(field: &str, value: &str) -> StoreResult<()> {
    if value.is_empty() {
        return Err(StoreError::InvalidEntry(format!("{} must not be empty", field)));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(StoreError::InvalidEntry(format!(
            "{} must not contain spaces: '{}'",
            field, value
        )));
    }
    Ok(())
}
