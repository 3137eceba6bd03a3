pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use format::{parse_row, render_row};
pub use input::{expand_key, parse_args, parse_entry, ParsedInput, ENTRY_KEYS};
pub use model::document::{DocumentState, TimesheetDocument};
pub use model::entry::TimeEntry;
pub use model::totals::Totals;
pub use repository::{DocumentRepository, FileDocumentRepository};
pub use service::timesheet_service::TimesheetService;
pub use time::resolve_entry_date;
