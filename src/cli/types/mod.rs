//! Type-safe wrappers and enums for cricket data.

pub mod cricket;
pub mod ids;

pub use cricket::{
    BattingStyle, MatchFormat, MatchStatus, Role, StatKind, TossDecision, VictoryType,
    BOWLING_STYLES,
};
pub use ids::{
    BattingId, BowlingId, InningsId, MatchId, PlayerId, SeriesId, TeamId, VenueId,
};
