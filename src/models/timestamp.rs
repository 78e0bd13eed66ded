//! Timestamp parsing for Mailjet date strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Parse a Mailjet timestamp into UTC.
///
/// Accepts RFC 3339 (`2020-10-01T08:24:56Z`, `...+02:00`), a naive
/// `YYYY-MM-DDTHH:MM:SS` (read as UTC) and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a nullable timestamp. Mailjet sends `""` for unset dates.
pub fn parse_optional_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.filter(|s| !s.trim().is_empty()).and_then(parse_timestamp)
}

/// Format a timestamp as ISO 8601 with an explicit offset, e.g.
/// `2020-10-01T08:24:56+00:00`.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, false)
}
