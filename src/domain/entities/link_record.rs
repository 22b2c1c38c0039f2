//! Link record entity mapping a full URL to its short code.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Storage format of `created_at` in the `url_map` table.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted short link.
///
/// `full_url` is the natural key: at most one record exists per URL.
/// Records are never deleted, expiry is derived at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: i64,
    pub full_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates a new LinkRecord instance.
    pub fn new(id: i64, full_url: String, short_code: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_url,
            short_code,
            created_at,
        }
    }
}

/// Input data for inserting or refreshing a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkRecord {
    pub full_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

/// Formats a timestamp the way it is stored (UTC, second precision).
pub fn format_created_at(ts: DateTime<Utc>) -> String {
    ts.format(CREATED_AT_FORMAT).to_string()
}

/// Parses a stored `created_at` value back into a UTC timestamp.
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, CREATED_AT_FORMAT).map(|naive| naive.and_utc())
}
