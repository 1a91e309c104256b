//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// Wall-clock format accepted by the edit command.
const EDIT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parses a local wall-clock time like `2026-02-03T09:30` into UTC.
///
/// DST ambiguity resolves to the earlier instant.
pub fn parse_local_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, EDIT_TIME_FORMAT)
        .with_context(|| format!("invalid time '{s}', expected YYYY-MM-DDTHH:MM"))?;
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("time '{s}' does not exist in the local timezone"))?;
    Ok(local.with_timezone(&Utc))
}

/// Formats a duration as "Xh Ym", "Xm" or "Xs".
pub fn format_duration(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    if total < 0 {
        return format!("-{}", format_duration(-delta));
    }
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{total}s")
    }
}

/// Formats a timestamp in the local timezone for display.
pub fn format_local(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
