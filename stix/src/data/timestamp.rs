//! STIX timestamps and the helpers for producing them.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Sub-second precision used when rendering a timestamp.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Precision {
    Second,
    #[default]
    Milli,
    Micro,
    Nano,
}

impl From<Precision> for SecondsFormat {
    fn from(value: Precision) -> Self {
        match value {
            Precision::Second => SecondsFormat::Secs,
            Precision::Milli => SecondsFormat::Millis,
            Precision::Micro => SecondsFormat::Micros,
            Precision::Nano => SecondsFormat::Nanos,
        }
    }
}

/// Renders `value` as an RFC 3339 UTC timestamp with a trailing `Z`.
pub fn to_string(value: &DateTime<Utc>, precision: Precision) -> String {
    value.to_rfc3339_opts(precision.into(), true)
}

/// The current time, rendered with [`to_string`].
pub fn current_time(precision: Precision) -> String {
    to_string(&Utc::now(), precision)
}

/// An RFC 3339 timestamp as it appears on the wire.
///
/// The text is kept verbatim so that decoding and re-encoding never changes the
/// producer's precision. [`Timestamp::parse`] interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn now(precision: Precision) -> Self {
        Self(current_time(precision))
    }

    pub fn from_datetime(value: &DateTime<Utc>, precision: Precision) -> Self {
        Self(to_string(value, precision))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether both timestamps name the same instant. Falls back to comparing the text
    /// when either one does not parse.
    pub fn same_instant(&self, other: &Timestamp) -> bool {
        match (self.parse(), other.parse()) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.0 == other.0,
        }
    }

    /// Parses the timestamp. STIX timestamps must be in UTC and end in `Z`.
    pub fn parse(&self) -> Result<DateTime<Utc>, Error> {
        if !self.0.ends_with('Z') {
            return Err(Error::validation(format!(
                "timestamp '{}' is not in UTC",
                self.0
            )));
        }
        DateTime::parse_from_rfc3339(&self.0)
            .map(|value| value.with_timezone(&Utc))
            .map_err(|e| Error::validation(format!("timestamp '{}' is invalid: {e}", self.0)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(&value, Precision::default())
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&Timestamp> for Timestamp {
    fn from(value: &Timestamp) -> Self {
        value.clone()
    }
}
