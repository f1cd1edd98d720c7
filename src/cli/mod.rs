//! CLI argument definitions and parsing.
//!
//! Each top-level subcommand is one dashboard page.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::forms::{BattingForm, BowlingForm, InningsForm, MatchForm, PlayerForm, TeamForm, VenueForm};
use crate::storage::TeamSort;
use types::{
    BattingId, BowlingId, MatchId, MatchStatus, PlayerId, Role, TeamId, VenueId,
};

/// Output flags shared by every page that prints a table.
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Print rows as JSON instead of a text table.
    #[clap(long)]
    pub json: bool,

    /// Also write the rows to this CSV file.
    #[clap(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Also write the rows to this Excel workbook.
    #[clap(long, value_name = "PATH")]
    pub xlsx: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[clap(
    name = "cricbuzz-livestats",
    about = "Cricbuzz LiveStats: live scores, SQL analytics and CRUD over a cricket database"
)]
pub struct Cli {
    /// Log HTTP and database activity to stderr (same as RUST_LOG=debug).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Project overview, configuration status and usage.
    Home,

    /// Live matches grouped by match type and series.
    Live {
        /// Skip the short-lived cache and fetch fresh scores.
        #[clap(long)]
        refresh: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Player search, profile and career statistics from Cricbuzz.
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },

    /// The predefined analytical SQL questions.
    Analytics {
        #[clap(subcommand)]
        cmd: AnalyticsCmd,
    },

    /// Create, read, update and delete database records.
    Admin {
        #[clap(subcommand)]
        cmd: AdminCmd,
    },

    /// Database setup and schema information.
    Db {
        #[clap(subcommand)]
        cmd: DbCmd,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Search players by name.
    Search {
        name: String,

        /// Print the raw API response.
        #[clap(long)]
        raw: bool,

        #[clap(long)]
        json: bool,
    },

    /// Personal information, rankings and debut details.
    Profile {
        /// Cricbuzz player id (see `player search`).
        id: u64,

        #[clap(long)]
        raw: bool,
    },

    /// Career batting statistics by format.
    Batting {
        id: u64,

        #[clap(long)]
        raw: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Career bowling statistics by format.
    Bowling {
        id: u64,

        #[clap(long)]
        raw: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Debut and last match played in each format.
    Career {
        id: u64,

        #[clap(long)]
        raw: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum AnalyticsCmd {
    /// Numbered list of the questions.
    List,

    /// A question and its SQL.
    Show { id: usize },

    /// Execute a question and print the result.
    Run {
        id: usize,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum DbCmd {
    /// Create any missing tables.
    Init,

    /// List tables with a short description of each.
    Tables,

    /// Execute a SQL script (e.g. a seed data dump) against the database.
    Import { path: PathBuf },
}

/// Which dropdown list `admin lookup` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupKind {
    Teams,
    Players,
    Venues,
    Series,
    Matches,
    Innings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TeamSortArg {
    #[default]
    Name,
    Country,
    Players,
    Matches,
}

impl From<TeamSortArg> for TeamSort {
    fn from(arg: TeamSortArg) -> Self {
        match arg {
            TeamSortArg::Name => TeamSort::Name,
            TeamSortArg::Country => TeamSort::Country,
            TeamSortArg::Players => TeamSort::MostPlayers,
            TeamSortArg::Matches => TeamSort::MostMatches,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AdminCmd {
    Players {
        #[clap(subcommand)]
        cmd: PlayersCmd,
    },
    Matches {
        #[clap(subcommand)]
        cmd: MatchesCmd,
    },
    Innings {
        #[clap(subcommand)]
        cmd: InningsCmd,
    },
    Batting {
        #[clap(subcommand)]
        cmd: BattingCmd,
    },
    Bowling {
        #[clap(subcommand)]
        cmd: BowlingCmd,
    },
    Teams {
        #[clap(subcommand)]
        cmd: TeamsCmd,
    },
    Venues {
        #[clap(subcommand)]
        cmd: VenuesCmd,
    },

    /// Id and label pairs for filling in form flags.
    Lookup {
        #[clap(value_enum)]
        kind: LookupKind,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlayersCmd {
    Create {
        #[clap(flatten)]
        form: PlayerForm,
    },
    List {
        /// Name or country contains.
        #[clap(long)]
        search: Option<String>,

        /// Exact team name.
        #[clap(long)]
        team: Option<String>,

        #[clap(long)]
        role: Option<Role>,

        #[clap(flatten)]
        output: OutputArgs,
    },
    /// Change only the supplied fields.
    Update {
        id: PlayerId,

        #[clap(flatten)]
        form: PlayerForm,
    },
    /// Remove a player with its batting, bowling and partnership rows.
    Delete {
        id: PlayerId,

        /// Actually delete; without it the affected rows are only shown.
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum MatchesCmd {
    Create {
        #[clap(flatten)]
        form: MatchForm,
    },
    List {
        /// Description or team name contains.
        #[clap(long)]
        search: Option<String>,

        #[clap(long)]
        status: Option<MatchStatus>,

        #[clap(flatten)]
        output: OutputArgs,
    },
    Update {
        id: MatchId,

        #[clap(flatten)]
        form: MatchForm,
    },
    /// Remove a match with its innings and everything recorded in them.
    Delete {
        id: MatchId,

        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum InningsCmd {
    Create {
        #[clap(flatten)]
        form: InningsForm,
    },
    List {
        /// Only innings of this match.
        #[clap(long = "match")]
        match_id: Option<MatchId>,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum BattingCmd {
    Create {
        #[clap(flatten)]
        form: BattingForm,
    },
    List {
        /// Player name contains.
        #[clap(long)]
        search: Option<String>,

        #[clap(long)]
        min_runs: Option<u32>,

        #[clap(flatten)]
        output: OutputArgs,
    },
    Update {
        id: BattingId,

        #[clap(flatten)]
        form: BattingForm,
    },
    Delete {
        id: BattingId,

        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum BowlingCmd {
    Create {
        #[clap(flatten)]
        form: BowlingForm,
    },
    List {
        #[clap(long)]
        search: Option<String>,

        #[clap(long)]
        min_wickets: Option<u32>,

        #[clap(long)]
        max_economy: Option<f64>,

        #[clap(flatten)]
        output: OutputArgs,
    },
    Update {
        id: BowlingId,

        #[clap(flatten)]
        form: BowlingForm,
    },
    Delete {
        id: BowlingId,

        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TeamsCmd {
    Create {
        #[clap(flatten)]
        form: TeamForm,
    },
    List {
        /// Name or country contains.
        #[clap(long)]
        search: Option<String>,

        #[clap(long, value_enum, default_value_t = TeamSortArg::Name)]
        sort: TeamSortArg,

        #[clap(flatten)]
        output: OutputArgs,
    },
    Update {
        id: TeamId,

        #[clap(flatten)]
        form: TeamForm,
    },
    /// Refused while players or matches still reference the team.
    Delete {
        id: TeamId,

        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum VenuesCmd {
    Create {
        #[clap(flatten)]
        form: VenueForm,
    },
    List {
        /// Name or city contains.
        #[clap(long)]
        search: Option<String>,

        #[clap(long)]
        min_capacity: Option<u32>,

        #[clap(long)]
        country: Option<String>,

        #[clap(flatten)]
        output: OutputArgs,
    },
    Update {
        id: VenueId,

        #[clap(flatten)]
        form: VenueForm,
    },
    /// Refused while matches are played at the venue.
    Delete {
        id: VenueId,

        #[clap(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_player_create() {
        let cli = Cli::try_parse_from([
            "cricbuzz-livestats",
            "admin",
            "players",
            "create",
            "--name",
            "Rohit Sharma",
            "--team-id",
            "1",
            "--country",
            "India",
            "--role",
            "batsman",
        ])
        .unwrap();

        let Commands::Admin {
            cmd: AdminCmd::Players {
                cmd: PlayersCmd::Create { form },
            },
        } = cli.command
        else {
            panic!("expected players create");
        };
        assert_eq!(form.full_name.as_deref(), Some("Rohit Sharma"));
        assert_eq!(form.team_id, Some(TeamId::new(1)));
        assert_eq!(form.role, Some(Role::Batsman));
    }

    #[test]
    fn test_parse_analytics_run_with_exports() {
        let cli = Cli::try_parse_from([
            "cricbuzz-livestats",
            "-v",
            "analytics",
            "run",
            "3",
            "--csv",
            "out.csv",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Analytics {
                cmd: AnalyticsCmd::Run { id, output },
            } => {
                assert_eq!(id, 3);
                assert_eq!(output.csv, Some(PathBuf::from("out.csv")));
                assert!(output.xlsx.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_positive_ids() {
        let result = Cli::try_parse_from([
            "cricbuzz-livestats",
            "admin",
            "teams",
            "delete",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_team_sort_mapping() {
        assert_eq!(TeamSort::from(TeamSortArg::Players), TeamSort::MostPlayers);
        assert_eq!(TeamSort::from(TeamSortArg::default()), TeamSort::Name);
    }
}
