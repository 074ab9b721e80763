use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Render an API date (`YYYY-MM-DD` or RFC 3339) as `"Jan 05, 2025"`.
///
/// Input that does not parse is returned unchanged.
pub fn format_date(iso: &str) -> String {
    let raw = iso.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        });

    match date {
        Some(date) => date.format("%b %d, %Y").to_string(),
        None => iso.to_string(),
    }
}
