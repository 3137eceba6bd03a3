use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use timesheet_core::format::format_hours;
use timesheet_core::{TimeEntry, TimesheetDocument};

// Helper struct for Table Row
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time Range")]
    time_range: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Nights")]
    nights: u32,
    #[tabled(rename = "Trips")]
    trips: u32,
}

impl EntryRow {
    fn new(index: usize, entry: &TimeEntry) -> Self {
        Self {
            index,
            date: entry.date.clone(),
            time_range: entry.time_range.clone(),
            hours: format_hours(entry.hours_worked),
            nights: entry.nights_on_call,
            trips: entry.trips_made,
        }
    }
}

pub fn show_document(doc: &TimesheetDocument) {
    println!("\x1b[1;36m{}\x1b[0m", doc.title);

    if doc.rows.is_empty() {
        println!("No time entries yet.");
    } else {
        let rows: Vec<EntryRow> = doc
            .rows
            .iter()
            .enumerate()
            .map(|(i, entry)| EntryRow::new(i, entry))
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
        println!("{}", table);
    }

    let totals = doc.totals();
    println!("Total Hours Worked:   {}", format_hours(totals.total_hours));
    println!("Total Nights On Call: {}", totals.total_nights);
    println!("Total Trips Made:     {}", totals.total_trips);
}

pub fn show_documents(names: &[String]) {
    if names.is_empty() {
        println!("No documents found.");
        return;
    }
    for (i, name) in names.iter().enumerate() {
        println!("{}. {}", i + 1, name);
    }
}
