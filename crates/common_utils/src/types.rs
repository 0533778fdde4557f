//! Types that can be used in other crates
use std::{fmt::Display, str::FromStr};

use error_stack::ResultExt;
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::errors::{CustomResult, ParsingError};

/// This Unit struct represents MinorUnit in which core amount works
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// gets amount as i64 value will be removed in future
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// forms a new minor default unit i.e zero
    pub fn zero() -> Self {
        Self(0)
    }

    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// checks if the amount is greater than the given value
    pub fn is_greater_than(&self, value: i64) -> bool {
        self.get_amount_as_i64() > value
    }
}

impl From<i64> for MinorUnit {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in time exchanged with the API as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    /// Wraps an [`OffsetDateTime`].
    pub fn new(date_time: OffsetDateTime) -> Self {
        Self(date_time)
    }

    /// The current time in UTC.
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// The wrapped [`OffsetDateTime`].
    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    /// Renders the timestamp the way it travels on the wire.
    pub fn to_rfc3339(&self) -> CustomResult<String, ParsingError> {
        self.0
            .format(&Rfc3339)
            .change_context(ParsingError)
            .attach_printable_lazy(|| format!("Unable to format {:?} as RFC 3339", self.0))
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(date_time: OffsetDateTime) -> Self {
        Self(date_time)
    }
}

impl FromStr for Timestamp {
    type Err = error_stack::Report<ParsingError>;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(value, &Rfc3339)
            .map(Self)
            .change_context(ParsingError)
            .attach_printable_lazy(|| format!("Unable to parse {value:?} as an RFC 3339 timestamp"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_timestamp_serde() {
        let timestamp = Timestamp::from_str("2024-05-01T10:20:30Z").unwrap();
        assert_eq!(timestamp.into_inner(), datetime!(2024-05-01 10:20:30 UTC));

        let serialized = serde_json::to_string(&timestamp).unwrap();
        assert_eq!(serialized, r#""2024-05-01T10:20:30Z""#);

        let deserialized = serde_json::from_str::<Timestamp>(&serialized).unwrap();
        assert_eq!(deserialized, timestamp);
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(Timestamp::from_str("yesterday").is_err());
        assert!(serde_json::from_str::<Timestamp>("1714558830").is_err());
    }

    #[test]
    fn test_minor_unit_is_transparent() {
        let amount = MinorUnit::new(1250);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "1250");
        assert!(amount.is_greater_than(1000));
        assert_eq!(MinorUnit::from(0), MinorUnit::zero());
    }
}
