use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A UTC calendar day in `YYYY-MM-DD` form.
///
/// All "same day" and "next day" decisions go through this type; raw
/// timestamps are never compared for day boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Parse a strict `YYYY-MM-DD` key. Rejects anything that is not exactly
    /// ten characters or does not name a real calendar day.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let bytes = raw.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

        if !shape_ok {
            return Err(DomainError::Validation(
                "Invalid date format; expected YYYY-MM-DD".to_string(),
            ));
        }

        NaiveDate::parse_from_str(raw, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DomainError::Validation(format!("Invalid calendar date: {}", raw)))
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    pub fn today_utc() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Signed number of calendar days from `self` to `other`.
    pub fn days_until(&self, other: &DateKey) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// True when `other` is exactly the calendar day after `self`.
    pub fn is_followed_by(&self, other: &DateKey) -> bool {
        self.days_until(other) == 1
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateKey::parse(&raw).map_err(|e| serde::de::Error::custom(e.message().to_string()))
    }
}
