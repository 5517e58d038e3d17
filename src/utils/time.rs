use chrono::{DateTime, Local, TimeZone, Utc};

/// Render a millisecond Unix timestamp as a calendar-date label in `tz`.
///
/// Returns `None` when the timestamp lies outside chrono's representable range.
pub fn format_timestamp_label<Tz>(timestamp_ms: i64, tz: &Tz, format: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
    Some(utc.with_timezone(tz).format(format).to_string())
}

pub fn current_human_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}
