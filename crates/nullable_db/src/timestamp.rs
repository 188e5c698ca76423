//! Temporal instant used on both sides of the storage boundary.

use chrono::{DateTime, Utc};
use std::fmt;

/// Timestamp wrapper for database values.
///
/// Always UTC. Textual form is RFC3339 with up to nine fractional digits,
/// trailing zeros trimmed, and a `Z` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DbTimestamp {
    inner: DateTime<Utc>,
}

/// Errors that can occur when parsing or constructing timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbTimestampError {
    message: String,
}

impl DbTimestampError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DbTimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DbTimestampError {}

impl DbTimestamp {
    /// Current timestamp in UTC.
    pub fn now() -> Self {
        Self { inner: Utc::now() }
    }

    /// Parse an RFC3339 timestamp string. Offsets are normalised to UTC.
    pub fn from_rfc3339(value: &str) -> Result<Self, DbTimestampError> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self {
                inner: dt.with_timezone(&Utc),
            })
            .map_err(|e| DbTimestampError::new(format!("Invalid timestamp {:?}: {}", value, e)))
    }

    /// Construct from Unix milliseconds.
    pub fn from_unix_millis(ms: i64) -> Result<Self, DbTimestampError> {
        DateTime::from_timestamp_millis(ms)
            .map(|inner| Self { inner })
            .ok_or_else(|| DbTimestampError::new("Invalid Unix milliseconds"))
    }

    /// Construct from Unix nanoseconds.
    pub fn from_unix_nanos(nanos: i64) -> Self {
        Self {
            inner: DateTime::from_timestamp_nanos(nanos),
        }
    }

    /// RFC3339 with nanosecond precision, trailing fractional zeros omitted.
    pub fn to_rfc3339(&self) -> String {
        let mut out = self.inner.format("%Y-%m-%dT%H:%M:%S").to_string();
        // chrono reports leap seconds as nanos >= 1e9
        let nanos = self.inner.timestamp_subsec_nanos() % 1_000_000_000;
        if nanos != 0 {
            let fraction = format!("{:09}", nanos);
            out.push('.');
            out.push_str(fraction.trim_end_matches('0'));
        }
        out.push('Z');
        out
    }

    /// Unix milliseconds since epoch.
    pub fn unix_millis(&self) -> i64 {
        self.inner.timestamp_millis()
    }

    pub fn as_chrono(&self) -> &DateTime<Utc> {
        &self.inner
    }
}

impl From<DateTime<Utc>> for DbTimestamp {
    fn from(inner: DateTime<Utc>) -> Self {
        Self { inner }
    }
}

impl From<DbTimestamp> for DateTime<Utc> {
    fn from(ts: DbTimestamp) -> Self {
        ts.inner
    }
}

impl fmt::Display for DbTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl serde::Serialize for DbTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> serde::Deserialize<'de> for DbTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        DbTimestamp::from_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}
