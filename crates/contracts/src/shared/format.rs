//! Display formatting shared by the widget UI.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Human-readable byte size: whole bytes below 1 KB, one decimal above.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// Belgian-Dutch short date (`d/m/yyyy`) from an ISO 8601 date or datetime.
///
/// Empty input gives an empty string; unparseable input is returned as is.
pub fn format_document_date(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match date {
        Ok(d) => d.format("%-d/%-m/%Y").to_string(),
        Err(_) => value.to_string(),
    }
}
