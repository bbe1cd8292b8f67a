use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use super::ParseError;

/// A timestamp layout accepted in the `datetime` field
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Layout {
    /// `Mon, 02 Jan 2006 15:04:05 MST`
    Rfc1123,
    /// `2006-01-02T15:04:05Z07:00`
    Rfc3339,
    /// Date and time without a zone, read as UTC
    DateTime(&'static str),
    /// Date only, read as midnight UTC
    Date(&'static str),
}

/// Tried in order; the first layout that matches wins.
pub const DATETIME_LAYOUTS: [Layout; 11] = [
    Layout::Rfc1123,
    Layout::Rfc3339,
    Layout::DateTime("%Y-%m-%d %H:%M:%S"),
    Layout::DateTime("%Y-%m-%d %H:%M"),
    Layout::Date("%Y-%m-%d"),
    Layout::Date("%d %b %Y"),
    Layout::DateTime("%d %b %Y %H:%M"),
    Layout::DateTime("%d %b %Y %H:%M:%S"),
    Layout::Date("%B %-d, %Y"),
    Layout::DateTime("%B %-d, %Y %H:%M"),
    Layout::DateTime("%B %-d, %Y %H:%M:%S"),
];

impl Layout {
    pub fn parse(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            Layout::Rfc1123 => DateTime::parse_from_rfc2822(raw).ok(),
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(raw).ok(),
            Layout::DateTime(fmt) => NaiveDateTime::parse_from_str(raw, fmt)
                .ok()
                .map(|naive| naive.and_utc().fixed_offset()),
            Layout::Date(fmt) => NaiveDate::parse_from_str(raw, fmt)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc().fixed_offset()),
        }
    }
}

pub fn parse_datetime(raw: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let raw = raw.trim();
    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(raw))
        .ok_or_else(|| ParseError::BadDatetime(raw.to_string()))
}
