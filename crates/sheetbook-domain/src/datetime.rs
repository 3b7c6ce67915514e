use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as an ISO-8601 string with millisecond precision,
/// e.g. `2024-01-01T12:00:00.000Z`.
pub fn now_iso() -> String {
    iso(Utc::now())
}

/// Current time in milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a point in time the way the ledger stores it.
pub fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
