//! Cricket enumerations shared by forms, storage and the CLI.
//!
//! Each variant has one canonical spelling, which is what gets stored in the
//! database. Parsing is case-insensitive so `--role all-rounder` and
//! `--role All-rounder` both work.

use crate::error::ValidationError;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ValidationError::InvalidValue {
                        field: $label,
                        reason: format!(
                            "'{}' is not one of: {}",
                            wanted,
                            $name::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
                        ),
                    })
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let text = value.as_str()?;
                text.parse()
                    .map_err(|e: ValidationError| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_enum!(
    /// A player's primary role in the side.
    Role, "role" {
        Batsman => "Batsman",
        Bowler => "Bowler",
        AllRounder => "All-rounder",
        WicketKeeper => "Wicket-keeper",
    }
);

text_enum!(
    BattingStyle, "batting style" {
        RightHanded => "Right-handed",
        LeftHanded => "Left-handed",
    }
);

text_enum!(
    /// Lifecycle of a fixture. Only completed matches may carry a winner.
    MatchStatus, "status" {
        Upcoming => "upcoming",
        Live => "live",
        Completed => "completed",
    }
);

text_enum!(
    TossDecision, "toss decision" {
        Bat => "bat",
        Bowl => "bowl",
    }
);

text_enum!(
    /// How a result margin is expressed.
    VictoryType, "victory type" {
        Runs => "runs",
        Wickets => "wickets",
    }
);

text_enum!(
    MatchFormat, "format" {
        Test => "Test",
        Odi => "ODI",
        T20 => "T20",
    }
);

text_enum!(
    /// Which career table to pull from the stats API.
    StatKind, "stat kind" {
        Batting => "batting",
        Bowling => "bowling",
    }
);

/// Suggested bowling styles for the player form. The column itself is free text.
pub const BOWLING_STYLES: &[&str] = &[
    "Right-arm fast",
    "Right-arm medium",
    "Right-arm offbreak",
    "Right-arm legbreak",
    "Left-arm fast",
    "Left-arm medium",
    "Left-arm orthodox",
    "Left-arm chinaman",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_text() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        assert_eq!(Role::AllRounder.to_string(), "All-rounder");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("all-rounder".parse::<Role>().unwrap(), Role::AllRounder);
        assert_eq!("COMPLETED".parse::<MatchStatus>().unwrap(), MatchStatus::Completed);
        assert_eq!("odi".parse::<MatchFormat>().unwrap(), MatchFormat::Odi);
    }

    #[test]
    fn test_parse_error_lists_choices() {
        let err = "Captain".parse::<Role>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("role"));
        assert!(msg.contains("Batsman, Bowler, All-rounder, Wicket-keeper"));
    }

    #[test]
    fn test_serde_uses_canonical_text() {
        let json = serde_json::to_string(&BattingStyle::LeftHanded).unwrap();
        assert_eq!(json, "\"Left-handed\"");
    }

    #[test]
    fn test_sql_round_trip() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let status: MatchStatus = conn
            .query_row("SELECT ?1", [MatchStatus::Live], |row| row.get(0))
            .unwrap();
        assert_eq!(status, MatchStatus::Live);
    }
}
