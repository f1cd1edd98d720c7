//! ID types for the cricket schema.
//!
//! Every table keys its rows with an SQLite rowid. Wrapping them keeps a
//! team id from being passed where a venue id is expected.

use crate::error::ValidationError;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().parse::<i64>() {
                    Ok(id) if id > 0 => Ok(Self(id)),
                    _ => Err(ValidationError::InvalidValue {
                        field: $label,
                        reason: format!("'{}' is not a positive id", s),
                    }),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

row_id!(
    /// Row id of `teams`.
    TeamId,
    "team id"
);
row_id!(
    /// Row id of `players`.
    PlayerId,
    "player id"
);
row_id!(
    /// Row id of `venues`.
    VenueId,
    "venue id"
);
row_id!(SeriesId, "series id");
row_id!(MatchId, "match id");
row_id!(InningsId, "innings id");
row_id!(BattingId, "batting id");
row_id!(BowlingId, "bowling id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        let id: TeamId = "42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_parse_rejects_zero_and_garbage() {
        assert!("0".parse::<PlayerId>().is_err());
        assert!("-3".parse::<PlayerId>().is_err());
        match "abc".parse::<VenueId>() {
            Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "venue id"),
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&MatchId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
