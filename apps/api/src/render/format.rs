//! Formatting rules shared by every template.

use chrono::NaiveDate;

/// End label of a range whose entry is ongoing.
pub const PRESENT: &str = "Present";

/// Month precision used for date labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    /// "June 2022"
    Long,
    /// "Jun 2022"
    Short,
}

/// Formats a stored `YYYY-MM` value (a full `YYYY-MM-DD` date is accepted too).
///
/// Empty input formats as an empty string. Input that is not a date is shown
/// verbatim: the record never rejects malformed dates, so the renderer does not
/// hide them either.
pub fn format_month(value: &str, style: MonthStyle) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    let parsed = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match parsed {
        Ok(date) => match style {
            MonthStyle::Long => date.format("%B %Y").to_string(),
            MonthStyle::Short => date.format("%b %Y").to_string(),
        },
        Err(_) => value.to_string(),
    }
}

/// A formatted start/end pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Builds the range; when `current` is set the end side is `Present`
    /// whatever the stored end value.
    pub fn new(start: &str, end: Option<&str>, current: bool, style: MonthStyle) -> Self {
        let end = if current {
            PRESENT.to_string()
        } else {
            end.map(|e| format_month(e, style)).unwrap_or_default()
        };
        DateRange {
            start: format_month(start, style),
            end,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }
}

/// Returns the trimmed value if it contains anything but whitespace.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn non_blank_opt(value: &Option<String>) -> Option<&str> {
    value.as_deref().and_then(non_blank)
}

/// Joins technology labels in stored order; `None` for an empty list.
pub fn join_labels(labels: &[String], separator: &str) -> Option<String> {
    if labels.is_empty() {
        None
    } else {
        Some(labels.join(separator))
    }
}

/// "company, location" with the location omitted when blank.
pub fn with_location(primary: &str, location: &str) -> String {
    match non_blank(location) {
        Some(loc) => format!("{primary}, {loc}"),
        None => primary.to_string(),
    }
}
