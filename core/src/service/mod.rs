pub mod timesheet_service;
pub mod totals_engine;
