//! Admin forms: the flag sets behind create and update, and their validation.
//!
//! Every field is optional at the flag level so the same form serves both
//! create and update. Update starts from the stored record
//! (`From<&Record>`), lays the supplied flags over it with `merged_over`,
//! and then validates the whole thing exactly like a create. A form that
//! fails validation never reaches the database.

pub mod derived;


use crate::cli::types::{
    BattingStyle, InningsId, MatchId, MatchStatus, PlayerId, Role, SeriesId, TeamId,
    TossDecision, VenueId, VictoryType,
};
use crate::error::ValidationError;
use crate::storage::{
    BattingRecord, BowlingRecord, InningsRecord, MatchRecord, PlayerRecord, TeamRecord,
    VenueRecord,
};
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

/// Highest batting position in an XI.
pub const MAX_BATTING_POSITION: u8 = 11;
pub const MAX_WICKETS: u32 = 10;
pub const MAX_SHORT_NAME_LEN: usize = 4;

type FormResult<T> = std::result::Result<T, ValidationError>;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn required_text(value: &Option<String>, field: &'static str) -> FormResult<String> {
    optional_text(value).ok_or(ValidationError::MissingField { field })
}

/// Trimmed text, with blank input treated as absent.
fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn required<T>(value: Option<T>, field: &'static str) -> FormResult<T> {
    value.ok_or(ValidationError::MissingField { field })
}

fn non_negative(value: f64, field: &'static str) -> FormResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidValue {
            field,
            reason: format!("{} must be zero or more", value),
        })
    }
}

/// Unset optional counters of 0 mean "unknown".
fn zero_as_unknown<T: PartialEq + Default>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

// ----------------------------------------------------------------------
// Players
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct PlayerForm {
    /// Full name (required).
    #[clap(long = "name")]
    pub full_name: Option<String>,

    #[clap(long)]
    pub short_name: Option<String>,

    /// Team id (required, see `admin lookup teams`).
    #[clap(long)]
    pub team_id: Option<TeamId>,

    /// Country (required).
    #[clap(long)]
    pub country: Option<String>,

    /// Batsman, Bowler, All-rounder or Wicket-keeper (required).
    #[clap(long)]
    pub role: Option<Role>,

    /// Right-handed or Left-handed.
    #[clap(long)]
    pub batting_style: Option<BattingStyle>,

    /// e.g. "Right-arm fast" or "Left-arm orthodox".
    #[clap(long)]
    pub bowling_style: Option<String>,

    /// Date of birth, YYYY-MM-DD.
    #[clap(long)]
    pub dob: Option<NaiveDate>,
}

impl PlayerForm {
    pub fn validate(&self) -> FormResult<PlayerRecord> {
        let full_name = required_text(&self.full_name, "full name")?;
        let team_id = required(self.team_id, "team")?;
        let country = required_text(&self.country, "country")?;
        let role = required(self.role, "role")?;

        if let Some(dob) = self.dob {
            if dob > today() {
                return Err(ValidationError::InvalidValue {
                    field: "date of birth",
                    reason: format!("{} is in the future", dob),
                });
            }
        }

        Ok(PlayerRecord {
            full_name,
            short_name: optional_text(&self.short_name),
            team_id,
            country,
            role,
            batting_style: self.batting_style,
            bowling_style: optional_text(&self.bowling_style),
            dob: self.dob,
        })
    }

    /// Supplied fields win, everything else comes from `base`.
    pub fn merged_over(self, base: PlayerForm) -> PlayerForm {
        PlayerForm {
            full_name: self.full_name.or(base.full_name),
            short_name: self.short_name.or(base.short_name),
            team_id: self.team_id.or(base.team_id),
            country: self.country.or(base.country),
            role: self.role.or(base.role),
            batting_style: self.batting_style.or(base.batting_style),
            bowling_style: self.bowling_style.or(base.bowling_style),
            dob: self.dob.or(base.dob),
        }
    }
}

impl From<&PlayerRecord> for PlayerForm {
    fn from(r: &PlayerRecord) -> Self {
        PlayerForm {
            full_name: Some(r.full_name.clone()),
            short_name: r.short_name.clone(),
            team_id: Some(r.team_id),
            country: Some(r.country.clone()),
            role: Some(r.role),
            batting_style: r.batting_style,
            bowling_style: r.bowling_style.clone(),
            dob: r.dob,
        }
    }
}

// ----------------------------------------------------------------------
// Matches
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct MatchForm {
    /// Match description, e.g. "1st ODI" (required).
    #[clap(long)]
    pub description: Option<String>,

    /// Match date, YYYY-MM-DD (required).
    #[clap(long)]
    pub date: Option<NaiveDate>,

    #[clap(long)]
    pub series_id: Option<SeriesId>,

    #[clap(long)]
    pub venue_id: Option<VenueId>,

    /// Home team id (required).
    #[clap(long = "home-team")]
    pub home_team_id: Option<TeamId>,

    /// Away team id (required, must differ from the home team).
    #[clap(long = "away-team")]
    pub away_team_id: Option<TeamId>,

    /// upcoming, live or completed [default: upcoming].
    #[clap(long)]
    pub status: Option<MatchStatus>,

    /// Winning team id; only for completed matches.
    #[clap(long = "winner")]
    pub winner_team_id: Option<TeamId>,

    #[clap(long = "toss-winner")]
    pub toss_winner_id: Option<TeamId>,

    /// bat or bowl.
    #[clap(long)]
    pub toss_decision: Option<TossDecision>,

    #[clap(long)]
    pub victory_margin: Option<u32>,

    /// runs or wickets.
    #[clap(long)]
    pub victory_type: Option<VictoryType>,
}

impl MatchForm {
    pub fn validate(&self) -> FormResult<MatchRecord> {
        let description = required_text(&self.description, "description")?;
        let date = required(self.date, "date")?;
        let home_team_id = required(self.home_team_id, "home team")?;
        let away_team_id = required(self.away_team_id, "away team")?;
        if home_team_id == away_team_id {
            return Err(ValidationError::SameTeams);
        }

        let status = self.status.unwrap_or(MatchStatus::Upcoming);
        let playing = [home_team_id, away_team_id];

        if let Some(winner) = self.winner_team_id {
            if status != MatchStatus::Completed {
                return Err(ValidationError::InvalidValue {
                    field: "winner",
                    reason: format!("a {} match cannot have a winner", status),
                });
            }
            if !playing.contains(&winner) {
                return Err(ValidationError::InvalidValue {
                    field: "winner",
                    reason: format!("team {} is not playing this match", winner),
                });
            }
        }
        if let Some(toss) = self.toss_winner_id {
            if !playing.contains(&toss) {
                return Err(ValidationError::InvalidValue {
                    field: "toss winner",
                    reason: format!("team {} is not playing this match", toss),
                });
            }
        }

        Ok(MatchRecord {
            series_id: self.series_id,
            description,
            date,
            venue_id: self.venue_id,
            home_team_id,
            away_team_id,
            status,
            winner_team_id: self.winner_team_id,
            toss_winner_id: self.toss_winner_id,
            toss_decision: self.toss_decision,
            victory_margin: self.victory_margin,
            victory_type: self.victory_type,
        })
    }

    /// Overlay the supplied flags on `base`.
    ///
    /// A stored result that no longer fits the updated match is dropped
    /// rather than rejected: the winner (with its margin) once the status is
    /// not completed or the winner stops playing, the toss (with its decision)
    /// once the toss winner stops playing. Supplied values are kept as given
    /// and judged by `validate`.
    pub fn merged_over(self, base: MatchForm) -> MatchForm {
        let home_team_id = self.home_team_id.or(base.home_team_id);
        let away_team_id = self.away_team_id.or(base.away_team_id);
        let status = self.status.or(base.status);
        let playing = |team: &TeamId| Some(*team) == home_team_id || Some(*team) == away_team_id;
        let completed = status == Some(MatchStatus::Completed);

        let inherited_winner = base.winner_team_id.filter(|w| completed && playing(w));
        let winner_dropped = base.winner_team_id.is_some() && inherited_winner.is_none();
        let (victory_margin, victory_type) = if self.winner_team_id.is_none() && winner_dropped {
            (self.victory_margin, self.victory_type)
        } else {
            (
                self.victory_margin.or(base.victory_margin),
                self.victory_type.or(base.victory_type),
            )
        };

        let inherited_toss = base.toss_winner_id.filter(playing);
        let toss_dropped = base.toss_winner_id.is_some() && inherited_toss.is_none();
        let toss_decision = if self.toss_winner_id.is_none() && toss_dropped {
            self.toss_decision
        } else {
            self.toss_decision.or(base.toss_decision)
        };

        MatchForm {
            description: self.description.or(base.description),
            date: self.date.or(base.date),
            series_id: self.series_id.or(base.series_id),
            venue_id: self.venue_id.or(base.venue_id),
            home_team_id,
            away_team_id,
            status,
            winner_team_id: self.winner_team_id.or(inherited_winner),
            toss_winner_id: self.toss_winner_id.or(inherited_toss),
            toss_decision,
            victory_margin,
            victory_type,
        }
    }
}

impl From<&MatchRecord> for MatchForm {
    fn from(r: &MatchRecord) -> Self {
        MatchForm {
            description: Some(r.description.clone()),
            date: Some(r.date),
            series_id: r.series_id,
            venue_id: r.venue_id,
            home_team_id: Some(r.home_team_id),
            away_team_id: Some(r.away_team_id),
            status: Some(r.status),
            winner_team_id: r.winner_team_id,
            toss_winner_id: r.toss_winner_id,
            toss_decision: r.toss_decision,
            victory_margin: r.victory_margin,
            victory_type: r.victory_type,
        }
    }
}

// ----------------------------------------------------------------------
// Innings
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct InningsForm {
    /// Match id (required).
    #[clap(long)]
    pub match_id: Option<MatchId>,

    /// Innings number within the match [default: 1].
    #[clap(long)]
    pub innings_no: Option<u8>,

    /// Batting team id (required).
    #[clap(long = "batting-team")]
    pub batting_team_id: Option<TeamId>,

    #[clap(long = "bowling-team")]
    pub bowling_team_id: Option<TeamId>,

    #[clap(long)]
    pub runs: Option<u32>,

    #[clap(long)]
    pub wickets: Option<u8>,

    #[clap(long)]
    pub overs: Option<f64>,
}

impl InningsForm {
    pub fn validate(&self) -> FormResult<InningsRecord> {
        let match_id = required(self.match_id, "match")?;
        let batting_team_id = required(self.batting_team_id, "batting team")?;

        let innings_no = self.innings_no.unwrap_or(1);
        if innings_no == 0 {
            return Err(ValidationError::InvalidValue {
                field: "innings number",
                reason: "innings are numbered from 1".to_string(),
            });
        }
        if self.bowling_team_id == Some(batting_team_id) {
            return Err(ValidationError::SameTeams);
        }
        let wickets = self.wickets.unwrap_or(0);
        if u32::from(wickets) > MAX_WICKETS {
            return Err(ValidationError::InvalidValue {
                field: "wickets",
                reason: format!("at most {} wickets fall in an innings", MAX_WICKETS),
            });
        }

        Ok(InningsRecord {
            match_id,
            innings_no,
            batting_team_id,
            bowling_team_id: self.bowling_team_id,
            runs: self.runs.unwrap_or(0),
            wickets,
            overs: non_negative(self.overs.unwrap_or(0.0), "overs")?,
        })
    }
}

// ----------------------------------------------------------------------
// Batting
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct BattingForm {
    /// Innings id (required, see `admin lookup innings`).
    #[clap(long)]
    pub innings_id: Option<InningsId>,

    /// Player id (required).
    #[clap(long)]
    pub player_id: Option<PlayerId>,

    #[clap(long)]
    pub runs: Option<u32>,

    #[clap(long)]
    pub balls: Option<u32>,

    #[clap(long)]
    pub fours: Option<u32>,

    #[clap(long)]
    pub sixes: Option<u32>,

    /// How the batter got out, e.g. "c Smith b Starc".
    #[clap(long)]
    pub dismissal: Option<String>,

    /// 1 to 11 [default: 1].
    #[clap(long = "position")]
    pub batting_position: Option<u8>,

    /// Strike rate; computed from runs and balls when omitted or off by more than 1.
    #[clap(long)]
    pub strike_rate: Option<f64>,
}

impl BattingForm {
    pub fn validate(&self) -> FormResult<BattingRecord> {
        let innings_id = required(self.innings_id, "innings")?;
        let player_id = required(self.player_id, "player")?;

        let batting_position = self.batting_position.unwrap_or(1);
        if !(1..=MAX_BATTING_POSITION).contains(&batting_position) {
            return Err(ValidationError::InvalidValue {
                field: "batting position",
                reason: format!("{} is outside 1-{}", batting_position, MAX_BATTING_POSITION),
            });
        }
        if let Some(sr) = self.strike_rate {
            non_negative(sr, "strike rate")?;
        }

        let runs = self.runs.unwrap_or(0);
        let balls = self.balls.unwrap_or(0);

        Ok(BattingRecord {
            innings_id,
            player_id,
            runs,
            balls,
            fours: self.fours.unwrap_or(0),
            sixes: self.sixes.unwrap_or(0),
            dismissal: optional_text(&self.dismissal),
            batting_position,
            strike_rate: derived::reconcile_strike_rate(self.strike_rate, runs, balls),
        })
    }

    pub fn merged_over(self, base: BattingForm) -> BattingForm {
        BattingForm {
            innings_id: self.innings_id.or(base.innings_id),
            player_id: self.player_id.or(base.player_id),
            runs: self.runs.or(base.runs),
            balls: self.balls.or(base.balls),
            fours: self.fours.or(base.fours),
            sixes: self.sixes.or(base.sixes),
            dismissal: self.dismissal.or(base.dismissal),
            batting_position: self.batting_position.or(base.batting_position),
            strike_rate: self.strike_rate.or(base.strike_rate),
        }
    }
}

impl From<&BattingRecord> for BattingForm {
    fn from(r: &BattingRecord) -> Self {
        BattingForm {
            innings_id: Some(r.innings_id),
            player_id: Some(r.player_id),
            runs: Some(r.runs),
            balls: Some(r.balls),
            fours: Some(r.fours),
            sixes: Some(r.sixes),
            dismissal: r.dismissal.clone(),
            batting_position: Some(r.batting_position),
            strike_rate: Some(r.strike_rate),
        }
    }
}

// ----------------------------------------------------------------------
// Bowling
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct BowlingForm {
    /// Innings id (required).
    #[clap(long)]
    pub innings_id: Option<InningsId>,

    /// Player id (required).
    #[clap(long)]
    pub player_id: Option<PlayerId>,

    #[clap(long)]
    pub overs: Option<f64>,

    #[clap(long)]
    pub maidens: Option<u32>,

    /// Runs conceded.
    #[clap(long)]
    pub runs: Option<u32>,

    #[clap(long)]
    pub wickets: Option<u32>,

    /// Economy; computed from runs and overs when omitted or off by more than 0.5.
    #[clap(long)]
    pub economy: Option<f64>,

    #[clap(long)]
    pub dots: Option<u32>,

    #[clap(long)]
    pub wides: Option<u32>,

    #[clap(long)]
    pub no_balls: Option<u32>,
}

impl BowlingForm {
    pub fn validate(&self) -> FormResult<BowlingRecord> {
        let innings_id = required(self.innings_id, "innings")?;
        let player_id = required(self.player_id, "player")?;

        let overs = non_negative(self.overs.unwrap_or(0.0), "overs")?;
        let wickets = self.wickets.unwrap_or(0);
        if wickets > MAX_WICKETS {
            return Err(ValidationError::InvalidValue {
                field: "wickets",
                reason: format!("at most {} wickets fall in an innings", MAX_WICKETS),
            });
        }
        if let Some(econ) = self.economy {
            non_negative(econ, "economy")?;
        }
        let runs = self.runs.unwrap_or(0);

        Ok(BowlingRecord {
            innings_id,
            player_id,
            overs,
            maidens: self.maidens.unwrap_or(0),
            runs,
            wickets,
            economy: derived::reconcile_economy(self.economy, runs, overs),
            dots: self.dots.unwrap_or(0),
            wides: self.wides.unwrap_or(0),
            no_balls: self.no_balls.unwrap_or(0),
        })
    }

    pub fn merged_over(self, base: BowlingForm) -> BowlingForm {
        BowlingForm {
            innings_id: self.innings_id.or(base.innings_id),
            player_id: self.player_id.or(base.player_id),
            overs: self.overs.or(base.overs),
            maidens: self.maidens.or(base.maidens),
            runs: self.runs.or(base.runs),
            wickets: self.wickets.or(base.wickets),
            economy: self.economy.or(base.economy),
            dots: self.dots.or(base.dots),
            wides: self.wides.or(base.wides),
            no_balls: self.no_balls.or(base.no_balls),
        }
    }
}

impl From<&BowlingRecord> for BowlingForm {
    fn from(r: &BowlingRecord) -> Self {
        BowlingForm {
            innings_id: Some(r.innings_id),
            player_id: Some(r.player_id),
            overs: Some(r.overs),
            maidens: Some(r.maidens),
            runs: Some(r.runs),
            wickets: Some(r.wickets),
            economy: Some(r.economy),
            dots: Some(r.dots),
            wides: Some(r.wides),
            no_balls: Some(r.no_balls),
        }
    }
}

// ----------------------------------------------------------------------
// Teams
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct TeamForm {
    /// Team name (required, unique).
    #[clap(long)]
    pub name: Option<String>,

    /// Country (required).
    #[clap(long)]
    pub country: Option<String>,

    /// Up to 4 characters, e.g. IND (unique).
    #[clap(long)]
    pub short_name: Option<String>,

    #[clap(long)]
    pub logo_url: Option<String>,
}

impl TeamForm {
    pub fn validate(&self) -> FormResult<TeamRecord> {
        let name = required_text(&self.name, "team name")?;
        let country = required_text(&self.country, "country")?;
        let short_name = optional_text(&self.short_name);
        if let Some(short) = &short_name {
            if short.chars().count() > MAX_SHORT_NAME_LEN {
                return Err(ValidationError::InvalidValue {
                    field: "short name",
                    reason: format!("'{}' is longer than {} characters", short, MAX_SHORT_NAME_LEN),
                });
            }
        }

        Ok(TeamRecord {
            name,
            country,
            short_name,
            logo_url: optional_text(&self.logo_url),
        })
    }

    pub fn merged_over(self, base: TeamForm) -> TeamForm {
        TeamForm {
            name: self.name.or(base.name),
            country: self.country.or(base.country),
            short_name: self.short_name.or(base.short_name),
            logo_url: self.logo_url.or(base.logo_url),
        }
    }
}

impl From<&TeamRecord> for TeamForm {
    fn from(r: &TeamRecord) -> Self {
        TeamForm {
            name: Some(r.name.clone()),
            country: Some(r.country.clone()),
            short_name: r.short_name.clone(),
            logo_url: r.logo_url.clone(),
        }
    }
}

// ----------------------------------------------------------------------
// Venues
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Args)]
pub struct VenueForm {
    /// Venue name (required).
    #[clap(long)]
    pub name: Option<String>,

    #[clap(long)]
    pub city: Option<String>,

    #[clap(long)]
    pub country: Option<String>,

    /// Seating capacity; 0 means unknown.
    #[clap(long)]
    pub capacity: Option<u32>,

    /// Year established; 0 means unknown.
    #[clap(long)]
    pub established: Option<u16>,
}

impl VenueForm {
    pub fn validate(&self) -> FormResult<VenueRecord> {
        let name = required_text(&self.name, "venue name")?;
        let established = zero_as_unknown(self.established);
        if let Some(year) = established {
            if i32::from(year) > today().year() {
                return Err(ValidationError::InvalidValue {
                    field: "established",
                    reason: format!("{} is in the future", year),
                });
            }
        }

        Ok(VenueRecord {
            name,
            city: optional_text(&self.city),
            country: optional_text(&self.country),
            capacity: zero_as_unknown(self.capacity),
            established,
        })
    }

    pub fn merged_over(self, base: VenueForm) -> VenueForm {
        VenueForm {
            name: self.name.or(base.name),
            city: self.city.or(base.city),
            country: self.country.or(base.country),
            capacity: self.capacity.or(base.capacity),
            established: self.established.or(base.established),
        }
    }
}

impl From<&VenueRecord> for VenueForm {
    fn from(r: &VenueRecord) -> Self {
        VenueForm {
            name: Some(r.name.clone()),
            city: r.city.clone(),
            country: r.country.clone(),
            capacity: r.capacity,
            established: r.established,
        }
    }
}
