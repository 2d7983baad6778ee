//! File-mtime freshness checks for cached tables.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Local, NaiveDateTime};
use tracing::warn;

/// Whether `path` was written more than `grace_hours` after `newest`.
///
/// Missing files and unreadable metadata count as stale; the caller
/// recomputes rather than trusting a file it cannot date.
pub fn is_newer_than(path: &Path, newest: NaiveDateTime, grace_hours: i64) -> bool {
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(_) => return false,
    };
    let modified: DateTime<Local> = modified.into();
    modified.naive_local() - newest > Duration::hours(grace_hours)
}

/// Parse a provider timestamp. Two formats appear in the wild, with and
/// without the `T` separator and with optional fractional seconds.
pub fn parse_source_timestamp(raw: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    warn!(raw, "unparseable source timestamp; ignoring it for freshness");
    None
}
