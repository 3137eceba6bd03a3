use std::collections::HashMap;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::error::{StoreError, StoreResult};
use crate::model::entry::TimeEntry;
use crate::time::{format_entry_date, resolve_entry_date};

/// Keys accepted in `key:value` entry input.
pub const ENTRY_KEYS: [&str; 5] = ["date", "range", "hours", "nights", "trips"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    /// Tokens that were not `key:value` pairs, in order.
    pub positional: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// Splits tokens into `key:value` pairs and plain positionals. A token only
/// counts as a pair when its key expands to one of `known_keys`, so values
/// such as `08:00-16:00` stay positional.
pub fn parse_args(args: &[String], known_keys: &[&str]) -> ParsedInput {
    let mut positional = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if let Ok(full_key) = expand_key(key, known_keys) {
                metadata.insert(full_key, value.to_string());
                continue;
            }
        }
        positional.push(arg.clone());
    }

    ParsedInput {
        positional,
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if key.is_empty() {
        return Err(anyhow!("Empty key"));
    }

    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Builds a `TimeEntry` from user tokens. Fields may be given as
/// `date:.. range:.. hours:.. nights:.. trips:..` or positionally in that
/// order; named fields win. A missing date means `today`, missing nights or
/// trips mean zero.
pub fn parse_entry(args: &[String], today: NaiveDate) -> StoreResult<TimeEntry> {
    let parsed = parse_args(args, &ENTRY_KEYS);
    let mut positional = parsed.positional.into_iter();
    let mut fields: HashMap<&str, String> = HashMap::new();

    for key in ENTRY_KEYS {
        let value = match parsed.metadata.get(key) {
            Some(value) => Some(value.clone()),
            None => positional.next(),
        };
        if let Some(value) = value {
            fields.insert(key, value);
        }
    }

    if let Some(extra) = positional.next() {
        return Err(StoreError::InvalidEntry(format!("unexpected value '{}'", extra)));
    }

    let date = match fields.get("date") {
        Some(text) => resolve_entry_date(text, today)
            .map_err(|e| StoreError::InvalidEntry(e.to_string()))?,
        None => format_entry_date(today),
    };

    let time_range = fields
        .get("range")
        .cloned()
        .ok_or_else(|| StoreError::InvalidEntry("time range is required".to_string()))?;

    let hours_text = fields
        .get("hours")
        .ok_or_else(|| StoreError::InvalidEntry("hours worked is required".to_string()))?;
    let hours_worked: f64 = hours_text.trim().parse().map_err(|_| {
        StoreError::InvalidEntry(format!("hours worked must be a number, got '{}'", hours_text))
    })?;

    let nights_on_call = parse_count(fields.get("nights"), "nights on call")?;
    let trips_made = parse_count(fields.get("trips"), "trips made")?;

    let entry = TimeEntry::new(date, time_range, hours_worked, nights_on_call, trips_made);
    entry.validate()?;
    Ok(entry)
}

fn parse_count(text: Option<&String>, field: &str) -> StoreResult<u32> {
    match text {
        None => Ok(0),
        Some(text) => text.trim().parse().map_err(|_| {
            StoreError::InvalidEntry(format!(
                "{} must be a whole number of zero or more, got '{}'",
                field, text
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(|s| s.to_string()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_parse_args_keeps_time_ranges_positional() {
        let parsed = parse_args(&args("08:00-16:00 h:8 trips:2"), &ENTRY_KEYS);
        assert_eq!(parsed.positional, vec!["08:00-16:00".to_string()]);
        assert_eq!(parsed.metadata.get("hours"), Some(&"8".to_string()));
        assert_eq!(parsed.metadata.get("trips"), Some(&"2".to_string()));
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("h", &ENTRY_KEYS).unwrap(), "hours");
        assert_eq!(expand_key("ra", &ENTRY_KEYS).unwrap(), "range");
        assert_eq!(expand_key("date", &ENTRY_KEYS).unwrap(), "date");
        assert!(expand_key("x", &ENTRY_KEYS).is_err());
        assert!(expand_key("", &ENTRY_KEYS).is_err());

        let candidates = ["nights", "notes"];
        assert!(expand_key("n", &candidates).is_err()); // ambiguous
    }

    #[test]
    fn test_parse_entry_named() {
        let entry = parse_entry(
            &args("date:01-05-2024 range:08:00-16:00 hours:8 nights:0 trips:2"),
            today(),
        )
        .unwrap();
        assert_eq!(entry, TimeEntry::new("01-05-2024", "08:00-16:00", 8.0, 0, 2));
    }

    #[test]
    fn test_parse_entry_positional() {
        let entry = parse_entry(&args("yesterday 20:00-00:30 4.5 1 0"), today()).unwrap();
        assert_eq!(entry, TimeEntry::new("01-09-2024", "20:00-00:30", 4.5, 1, 0));
    }

    #[test]
    fn test_parse_entry_defaults() {
        let entry = parse_entry(&args("r:09:00-12:00 h:3"), today()).unwrap();
        assert_eq!(entry, TimeEntry::new("01-10-2024", "09:00-12:00", 3.0, 0, 0));
    }

    #[test]
    fn test_parse_entry_rejects_bad_numbers() {
        for line in [
            "r:09:00-12:00 h:three",
            "r:09:00-12:00 h:-1",
            "r:09:00-12:00 h:3 n:1.5",
            "r:09:00-12:00 h:3 t:-2",
            "h:3",
            "r:09:00-12:00",
            "date:someday r:09:00-12:00 h:3",
            "date:-3é r:09:00-12:00 h:3",
            "date:+100000000d r:09:00-12:00 h:3",
            "01-05-2024 08:00-16:00 8 0 2 extra",
        ] {
            assert!(
                matches!(parse_entry(&args(line), today()), Err(StoreError::InvalidEntry(_))),
                "expected InvalidEntry for {:?}",
                line
            );
        }
    }
}
