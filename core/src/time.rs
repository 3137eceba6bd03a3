use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

/// How dates are written into the date column.
pub const ENTRY_DATE_FORMAT: &str = "%m-%d-%Y";

pub fn format_entry_date(date: NaiveDate) -> String {
    date.format(ENTRY_DATE_FORMAT).to_string()
}

/// Turns what a user typed for "date" into the `MM-DD-YYYY` text stored in a
/// row. `today` is passed in so callers (and tests) control the anchor.
pub fn resolve_entry_date(input: &str, today: NaiveDate) -> Result<String> {
    resolve_date(input.trim(), today).map(format_entry_date)
}

fn resolve_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => return shift(today, TimeDelta::try_days(-1), input),
        _ => {}
    }

    // 2. Relative format (-Nd, -Nw, +Nd)
    if input.starts_with('-') || input.starts_with('+') {
        return parse_offset(input).and_then(|offset| shift(today, Some(offset), input));
    }

    // 3. Weekday: the most recent one, today included
    if let Ok(weekday) = parse_weekday_str(input) {
        let back = (7 + today.weekday().num_days_from_monday() as i64
            - weekday.num_days_from_monday() as i64)
            % 7;
        return shift(today, TimeDelta::try_days(-back), input);
    }

    // 4. Fallback to explicit formats
    for format in [ENTRY_DATE_FORMAT, "%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn shift(today: NaiveDate, offset: Option<TimeDelta>, input: &str) -> Result<NaiveDate> {
    offset
        .and_then(|offset| today.checked_add_signed(offset))
        .ok_or_else(|| anyhow!("Date out of range: {}", input))
}

fn parse_offset(input: &str) -> Result<TimeDelta> {
    let invalid = || anyhow!("Invalid relative date: {}", input);
    let (sign, rest) = input.split_at(1);
    let (unit_at, unit) = rest.char_indices().last().ok_or_else(invalid)?;
    let num_str = &rest[..unit_at];
    if num_str.is_empty() {
        return Err(invalid());
    }
    let count: i64 = num_str.parse().map_err(|_| invalid())?;
    let count = if sign == "-" {
        count.checked_neg().ok_or_else(invalid)?
    } else {
        count
    };

    let offset = match unit.to_ascii_lowercase() {
        'd' => TimeDelta::try_days(count),
        'w' => TimeDelta::try_weeks(count),
        _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
    };
    offset.ok_or_else(|| anyhow!("Date out of range: {}", input))
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}
