use serde::{Deserialize, Serialize};

use crate::model::entry::TimeEntry;

/// Aggregates over every data row of a document. Never stored on its own;
/// always derived from the rows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total_hours: f64,
    pub total_nights: u64,
    pub total_trips: u64,
}

impl Totals {
    pub fn from_rows(rows: &[TimeEntry]) -> Self {
        let mut totals = Totals::default();
        for entry in rows {
            totals.add(entry);
        }
        totals
    }

    pub fn add(&mut self, entry: &TimeEntry) {
        self.total_hours += entry.hours_worked;
        self.total_nights += u64::from(entry.nights_on_call);
        self.total_trips += u64::from(entry.trips_made);
    }
}
