//! Canonical epoch parsing for commit date strings (§9 "Determinism across
//! hosts": "Date comparison uses a canonical epoch integer parsed from the
//! input textual form").

use chrono::DateTime;

/// Parse a date string into a canonical epoch (seconds since Unix epoch).
///
/// Accepts RFC3339 timestamps (`2024-01-01T00:00:00Z`) as the primary form,
/// and falls back to a bare integer epoch string (what the external parser
/// emits when it copies `%at`/`%ct` straight from `git log` verbatim).
/// Unparseable input canonicalizes to `0` so sorting stays total and
/// deterministic rather than panicking on bad data.
pub fn canonical_epoch(raw: &str) -> i64 {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp();
    }
    raw.trim().parse::<i64>().unwrap_or(0)
}
