//! Data models for the storage layer

use crate::cli::types::{
    BattingId, BattingStyle, BowlingId, InningsId, MatchId, MatchStatus, PlayerId, Role,
    SeriesId, TeamId, TossDecision, VenueId, VictoryType,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Team columns as submitted through the team form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub country: String,
    pub short_name: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    #[serde(flatten)]
    pub record: TeamRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub capacity: Option<u32>,
    pub established: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub venue_id: VenueId,
    #[serde(flatten)]
    pub record: VenueRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub full_name: String,
    pub short_name: Option<String>,
    pub team_id: TeamId,
    pub country: String,
    pub role: Role,
    pub batting_style: Option<BattingStyle>,
    pub bowling_style: Option<String>,
    pub dob: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub record: PlayerRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub series_id: Option<SeriesId>,
    pub description: String,
    pub date: NaiveDate,
    pub venue_id: Option<VenueId>,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub status: MatchStatus,
    pub winner_team_id: Option<TeamId>,
    pub toss_winner_id: Option<TeamId>,
    pub toss_decision: Option<TossDecision>,
    pub victory_margin: Option<u32>,
    pub victory_type: Option<VictoryType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,
    #[serde(flatten)]
    pub record: MatchRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsRecord {
    pub match_id: MatchId,
    pub innings_no: u8,
    pub batting_team_id: TeamId,
    pub bowling_team_id: Option<TeamId>,
    pub runs: u32,
    pub wickets: u8,
    pub overs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Innings {
    pub innings_id: InningsId,
    #[serde(flatten)]
    pub record: InningsRecord,
}

/// One batter's line in an innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingRecord {
    pub innings_id: InningsId,
    pub player_id: PlayerId,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub dismissal: Option<String>,
    pub batting_position: u8,
    pub strike_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batting {
    pub batting_id: BattingId,
    #[serde(flatten)]
    pub record: BattingRecord,
}

/// One bowler's figures in an innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingRecord {
    pub innings_id: InningsId,
    pub player_id: PlayerId,
    pub overs: f64,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
    pub dots: u32,
    pub wides: u32,
    pub no_balls: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bowling {
    pub bowling_id: BowlingId,
    #[serde(flatten)]
    pub record: BowlingRecord,
}

/// Id and label pairs backing the form dropdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupEntry {
    pub id: i64,
    pub label: String,
}

/// Filters for the players listing.
#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    /// Case-insensitive substring of the name or country.
    pub search: Option<String>,
    /// Exact team name.
    pub team: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    /// Substring of the description or either team name.
    pub search: Option<String>,
    pub status: Option<MatchStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct BattingFilter {
    /// Substring of the player name.
    pub search: Option<String>,
    pub min_runs: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct BowlingFilter {
    pub search: Option<String>,
    pub min_wickets: Option<u32>,
    pub max_economy: Option<f64>,
}

/// Sort order for the teams listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamSort {
    #[default]
    Name,
    Country,
    MostPlayers,
    MostMatches,
}

#[derive(Debug, Clone, Default)]
pub struct TeamFilter {
    pub search: Option<String>,
    pub sort: TeamSort,
}

#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    /// Substring of the venue name or city.
    pub search: Option<String>,
    pub min_capacity: Option<u32>,
    /// Substring of the country.
    pub country: Option<String>,
}

/// Rows that go with a player when it is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerDependents {
    pub batting: u64,
    pub bowling: u64,
    pub partnerships: u64,
    pub aggregates: u64,
}

impl PlayerDependents {
    pub fn is_empty(&self) -> bool {
        self.batting + self.bowling + self.partnerships + self.aggregates == 0
    }
}

/// Rows that go with a match when it is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchDependents {
    pub innings: u64,
    pub batting: u64,
    pub bowling: u64,
    pub partnerships: u64,
}

impl MatchDependents {
    pub fn is_empty(&self) -> bool {
        self.innings + self.batting + self.bowling + self.partnerships == 0
    }
}

/// Rows that block a team delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamDependents {
    pub players: u64,
    pub matches: u64,
}

impl TeamDependents {
    pub fn is_empty(&self) -> bool {
        self.players == 0 && self.matches == 0
    }

    pub fn describe(&self) -> String {
        format!("{} players and {} matches", self.players, self.matches)
    }
}

/// Summary line shown under the bowling listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingSummary {
    pub total_wickets: i64,
    pub best_player: String,
    pub best_wickets: i64,
    pub best_runs: i64,
}
