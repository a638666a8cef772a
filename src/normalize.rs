//! Canonicalizes Jira resolution data into a single display string.

use chrono::{DateTime, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Offset-carrying layouts tried after RFC 3339, in order.
const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.3f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Layout without an offset. Fractional seconds are optional in every layout
/// after the first.
const NAIVE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Display value for the RESOLVED column.
///
/// A parseable `raw_date` wins and is shown as `YYYY-MM-DD HH:MM` in the
/// timestamp's own offset. Otherwise the trimmed resolution name is used if
/// present, and failing that the trimmed raw date is returned as is.
pub fn resolved_display(raw_date: &str, resolution_name: &str) -> String {
    let date = raw_date.trim();

    if !date.is_empty() {
        if let Some(formatted) = parse_timestamp(date) {
            return formatted;
        }
    }

    let name = resolution_name.trim();
    if !name.is_empty() {
        return name.to_string();
    }

    date.to_string()
}

fn parse_timestamp(value: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.format(DISPLAY_FORMAT).to_string());
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(value, layout) {
            return Some(dt.format(DISPLAY_FORMAT).to_string());
        }
    }

    NaiveDateTime::parse_from_str(value, NAIVE_LAYOUT)
        .ok()
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}
