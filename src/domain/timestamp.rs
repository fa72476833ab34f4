//! Millisecond-precision UTC timestamps.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Error returned when a date string cannot be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid date: '{0}'")]
pub struct InvalidTimestamp(pub String);

/// A timestamp wrapper for `DateTime<Utc>`, truncated to milliseconds.
///
/// Serialized as RFC 3339 with a `Z` suffix, e.g. `2024-05-01T00:00:00.000Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`, dropping sub-millisecond digits.
    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.trunc_subsecs(3))
    }

    /// Returns the current time.
    ///
    /// **Note**: This is an impure function (reads the clock).
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parses RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC),
    /// or a bare `YYYY-MM-DD` (midnight UTC).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTimestamp`] if none of the formats match.
    pub fn parse(value: &str) -> Result<Self, InvalidTimestamp> {
        let trimmed = value.trim();

        if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_datetime(datetime.with_timezone(&Utc)));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::from_datetime(naive.and_utc()));
        }

        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self::from_datetime(naive.and_utc()))
            .ok_or_else(|| InvalidTimestamp(value.to_string()))
    }

    /// Creates a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct TimestampVisitor;

impl de::Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a date string or milliseconds since the epoch")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Timestamp::parse(value).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Timestamp::from_epoch_millis(value)
            .ok_or_else(|| E::custom(format!("timestamp out of range: {value}")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        let millis =
            i64::try_from(value).map_err(|_| E::custom(format!("timestamp out of range: {value}")))?;
        self.visit_i64(millis)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}
