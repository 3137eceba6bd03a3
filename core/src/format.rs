//! Fixed-width text encoding of a timesheet document.
//!
//! Layout of a file:
//!
//! ```text
//! ---------------------------------------------------------------- (83 wide)
//!                  Jane Hours - Cauls Funeral Home
//! ----------------------------------------------------------------
//! Date (MM-DD-YYYY)   Time Range        Hours Worked        Nights On Call Trips Made
//! ----------------------------------------------------------------
//! 01-05-2024          08:00-16:00       8.0                 0              2
//! ----------------------------------------------------------------
//! Total Hours Worked:           8.0
//! Total Nights On Call:         0
//! Total Trips Made While On Call:2
//! ```
//!
//! Writes always pad to the canonical widths. Reads split on whitespace and
//! drop anything that does not look like a row.

use tracing::debug;

use crate::model::document::{DocumentState, TimesheetDocument};
use crate::model::entry::TimeEntry;
use crate::model::totals::Totals;

pub const LINE_WIDTH: usize = 83;
/// Divider, title, divider, column headers, divider.
pub const HEADER_LINES: usize = 5;
/// Any line starting with this ends the data rows.
pub const TOTALS_MARKER: &str = "Total";

const DATE_WIDTH: usize = 20;
const TIME_RANGE_WIDTH: usize = 18;
const HOURS_WIDTH: usize = 20;
const NIGHTS_WIDTH: usize = 15;
const TRIPS_WIDTH: usize = 14;

const LABEL_WIDTH: usize = 30;
const VALUE_WIDTH: usize = 10;

const COLUMN_LABELS: [&str; 5] = [
    "Date (MM-DD-YYYY)",
    "Time Range",
    "Hours Worked",
    "Nights On Call",
    "Trips Made",
];

const TOTAL_HOURS_LABEL: &str = "Total Hours Worked:";
const TOTAL_NIGHTS_LABEL: &str = "Total Nights On Call:";
const TOTAL_TRIPS_LABEL: &str = "Total Trips Made While On Call:";

pub fn divider() -> String {
    "-".repeat(LINE_WIDTH)
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// Centers `text` in `width` columns. When the margin is odd the extra space
/// goes on the left.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(margin - left))
}

/// Decimal form with at least one fractional digit (`8.0`, `12.5`), switching
/// to exponent notation for very large or very small magnitudes.
pub fn format_hours(hours: f64) -> String {
    let magnitude = hours.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let text = format!("{:e}", hours);
        if let Some((mantissa, exponent)) = text.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
        return text;
    }
    if hours.fract() == 0.0 {
        format!("{:.1}", hours)
    } else {
        format!("{}", hours)
    }
}

pub fn render_header(title: &str) -> String {
    let divider = divider();
    let columns: String = COLUMN_LABELS
        .iter()
        .zip(column_widths())
        .map(|(label, width)| pad(label, width))
        .collect();
    format!(
        "{d}\n{title}\n{d}\n{columns}\n{d}\n",
        d = divider,
        title = center(title, LINE_WIDTH),
        columns = columns,
    )
}

fn column_widths() -> [usize; 5] {
    [DATE_WIDTH, TIME_RANGE_WIDTH, HOURS_WIDTH, NIGHTS_WIDTH, TRIPS_WIDTH]
}

/// Encodes one data row, newline included.
pub fn render_row(entry: &TimeEntry) -> String {
    format!(
        "{}{}{}{}{}\n",
        pad(&entry.date, DATE_WIDTH),
        pad(&entry.time_range, TIME_RANGE_WIDTH),
        pad(&format_hours(entry.hours_worked), HOURS_WIDTH),
        pad(&entry.nights_on_call.to_string(), NIGHTS_WIDTH),
        pad(&entry.trips_made.to_string(), TRIPS_WIDTH),
    )
}

/// Decodes one data row. Returns `None` for anything that is not a row:
/// fewer than five fields, or numeric fields that do not parse.
pub fn parse_row(line: &str) -> Option<TimeEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return None;
    }

    let hours_worked: f64 = fields[2].parse().ok()?;
    let nights_on_call: u32 = fields[3].parse().ok()?;
    let trips_made: u32 = fields[4].parse().ok()?;

    let entry = TimeEntry::new(fields[0], fields[1], hours_worked, nights_on_call, trips_made);
    entry.validate().ok()?;
    Some(entry)
}

pub fn render_totals(totals: &Totals) -> String {
    render_totals_with_hours(&format_hours(totals.total_hours), totals)
}

/// Totals block for a document with no rows. The hours sum never saw a
/// fractional value, so it is written as a bare `0`.
pub fn render_empty_totals() -> String {
    render_totals_with_hours("0", &Totals::default())
}

fn render_totals_with_hours(hours: &str, totals: &Totals) -> String {
    format!(
        "{}\n{}{}\n{}{}\n{}{}\n",
        divider(),
        pad(TOTAL_HOURS_LABEL, LABEL_WIDTH),
        pad(hours, VALUE_WIDTH),
        pad(TOTAL_NIGHTS_LABEL, LABEL_WIDTH),
        pad(&totals.total_nights.to_string(), VALUE_WIDTH),
        pad(TOTAL_TRIPS_LABEL, LABEL_WIDTH),
        pad(&totals.total_trips.to_string(), VALUE_WIDTH),
    )
}

pub fn render_document(doc: &TimesheetDocument) -> String {
    let mut out = render_header(&doc.title);
    for entry in &doc.rows {
        out.push_str(&render_row(entry));
    }
    if doc.state == DocumentState::Totaled {
        if doc.rows.is_empty() {
            out.push_str(&render_empty_totals());
        } else {
            out.push_str(&render_totals(&doc.totals()));
        }
    }
    out
}

pub fn parse_document(name: &str, text: &str) -> TimesheetDocument {
    let lines: Vec<&str> = text.lines().collect();

    let title = lines
        .get(1)
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| name.to_string());

    let mut rows = Vec::new();
    let mut state = DocumentState::Empty;

    for (number, line) in lines.iter().enumerate().skip(HEADER_LINES) {
        if line.starts_with(TOTALS_MARKER) {
            state = DocumentState::Totaled;
            break;
        }
        match parse_row(line) {
            Some(entry) => rows.push(entry),
            None => {
                if !is_structural(line) {
                    debug!("{}: skipping malformed line {}: {:?}", name, number + 1, line);
                }
            }
        }
    }

    TimesheetDocument {
        name: name.to_string(),
        title,
        rows,
        state,
    }
}

fn is_structural(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TimeEntry {
        TimeEntry::new("01-05-2024", "08:00-16:00", 8.0, 0, 2)
    }

    #[test]
    fn test_render_row_widths() {
        let line = render_row(&sample());
        assert_eq!(
            line,
            "01-05-2024          08:00-16:00       8.0                 0              2             \n"
        );
        assert_eq!(line.len(), 20 + 18 + 20 + 15 + 14 + 1);
    }

    #[test]
    fn test_parse_row_round_trip() {
        let entry = TimeEntry::new("12-31-2023", "22:00-06:30", 8.5, 1, 3);
        assert_eq!(parse_row(&render_row(&entry)), Some(entry));
    }

    #[test]
    fn test_parse_row_overlong_fields() {
        // A single space is enough to separate fields wider than their column.
        let line = "01-05-2024 a-very-long-time-range-text 7.25 0 11";
        let entry = parse_row(line).unwrap();
        assert_eq!(entry.time_range, "a-very-long-time-range-text");
        assert_eq!(entry.hours_worked, 7.25);
        assert_eq!(entry.trips_made, 11);
    }

    #[test]
    fn test_parse_row_rejects_short_or_non_numeric() {
        assert!(parse_row("").is_none());
        assert!(parse_row(&divider()).is_none());
        assert!(parse_row("01-05-2024 08:00-16:00 8.0 0").is_none());
        assert!(parse_row("01-05-2024 08:00-16:00 eight 0 1").is_none());
        assert!(parse_row("01-05-2024 08:00-16:00 8.0 -1 1").is_none());
    }

    #[test]
    fn test_center_matches_odd_width_rule() {
        assert_eq!(center("ab", 5), "  ab ");
        assert_eq!(center("abc", 5), " abc ");
        assert_eq!(center("toolong", 3), "toolong");
        assert_eq!(center("Jane Hours - Cauls Funeral Home", LINE_WIDTH).len(), LINE_WIDTH);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8.0), "8.0");
        assert_eq!(format_hours(0.0), "0.0");
        assert_eq!(format_hours(12.5), "12.5");
        assert_eq!(format_hours(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_hours(1e21), "1e+21");
        assert_eq!(format_hours(0.00001), "1e-05");
    }

    #[test]
    fn test_header_block() {
        let header = render_header("Jane Hours - Cauls Funeral Home");
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines.len(), HEADER_LINES);
        assert_eq!(lines[0], divider());
        assert_eq!(lines[1].trim(), "Jane Hours - Cauls Funeral Home");
        assert_eq!(lines[2], divider());
        assert!(lines[3].starts_with("Date (MM-DD-YYYY)   Time Range        Hours Worked"));
        assert_eq!(lines[4], divider());
    }

    #[test]
    fn test_totals_block() {
        let totals = Totals {
            total_hours: 12.5,
            total_nights: 1,
            total_trips: 1,
        };
        let block = render_totals(&totals);
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], divider());
        assert_eq!(lines[1], "Total Hours Worked:           12.5      ");
        assert_eq!(lines[2], "Total Nights On Call:         1         ");
        assert_eq!(lines[3], "Total Trips Made While On Call:1         ");
    }

    #[test]
    fn test_empty_totals_block_writes_bare_zero() {
        let block = render_empty_totals();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Total Hours Worked:           0         ");
        assert_eq!(lines[2], "Total Nights On Call:         0         ");
        assert_eq!(lines[3], "Total Trips Made While On Call:0         ");
    }

    #[test]
    fn test_parse_document_stops_at_totals() {
        let mut text = render_header("Jane Hours - X");
        text.push_str(&render_row(&sample()));
        text.push_str("garbage line\n");
        text.push_str(&render_totals(&Totals::default()));
        text.push_str(&render_row(&sample()));

        let doc = parse_document("Jane", &text);
        assert_eq!(doc.title, "Jane Hours - X");
        assert_eq!(doc.rows, vec![sample()]);
        assert_eq!(doc.state, DocumentState::Totaled);
    }

    #[test]
    fn test_parse_document_without_totals() {
        let mut text = render_header("Jane Hours - X");
        text.push_str(&render_row(&sample()));
        let doc = parse_document("Jane", &text);
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.state, DocumentState::Empty);
    }

    #[test]
    fn test_render_parse_is_stable() {
        let mut doc = TimesheetDocument::new("Jane", "Cauls Funeral Home");
        doc.rows.push(sample());
        doc.state = DocumentState::Totaled;
        let text = render_document(&doc);
        assert_eq!(render_document(&parse_document("Jane", &text)), text);
    }
}
