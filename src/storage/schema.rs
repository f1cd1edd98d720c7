//! Database schema and connection management

use rusqlite::{
    functions::{Aggregate, Context, FunctionFlags},
    Connection,
};
use tracing::{debug, info};

use crate::core::config::DatabaseLocation;
use crate::Result;

/// Connection to the cricket statistics schema.
///
/// One of these is opened per interaction and handed to the page handler
/// that needs it; dropping it closes the connection.
pub struct CricketDatabase {
    pub(crate) conn: Connection,
}

impl CricketDatabase {
    /// Open the configured database and make sure every table exists.
    pub fn open(location: &DatabaseLocation) -> Result<Self> {
        let conn = match location {
            DatabaseLocation::InMemory => Connection::open_in_memory()?,
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                info!(path = %path.display(), "opening database");
                Connection::open(path)?
            }
        };
        Self::from_connection(conn)
    }

    /// Create a fresh in-memory database with the full schema.
    pub fn new_in_memory() -> Result<Self> {
        Self::open(&DatabaseLocation::InMemory)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        register_functions(&conn)?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        debug!("schema ready");
        Ok(())
    }

    /// Names of the tables currently present, alphabetically.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS teams (
    team_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    country TEXT NOT NULL,
    short_name TEXT,
    logo_url TEXT
);

CREATE TABLE IF NOT EXISTS venues (
    venue_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    city TEXT,
    country TEXT,
    capacity INTEGER CHECK (capacity IS NULL OR capacity >= 0),
    established INTEGER
);

CREATE TABLE IF NOT EXISTS series (
    series_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    host_country TEXT,
    format TEXT,
    start_date TEXT,
    end_date TEXT,
    planned_matches INTEGER CHECK (planned_matches IS NULL OR planned_matches >= 0)
);

CREATE TABLE IF NOT EXISTS players (
    player_id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    short_name TEXT,
    team_id INTEGER REFERENCES teams(team_id),
    country TEXT,
    role TEXT,
    batting_style TEXT,
    bowling_style TEXT,
    dob TEXT
);

CREATE TABLE IF NOT EXISTS matches (
    match_id INTEGER PRIMARY KEY AUTOINCREMENT,
    series_id INTEGER REFERENCES series(series_id),
    description TEXT NOT NULL,
    date TEXT NOT NULL,
    venue_id INTEGER REFERENCES venues(venue_id),
    home_team_id INTEGER NOT NULL REFERENCES teams(team_id),
    away_team_id INTEGER NOT NULL REFERENCES teams(team_id),
    status TEXT NOT NULL DEFAULT 'upcoming',
    winner_team_id INTEGER REFERENCES teams(team_id),
    toss_winner_id INTEGER REFERENCES teams(team_id),
    toss_decision TEXT,
    victory_margin INTEGER CHECK (victory_margin IS NULL OR victory_margin >= 0),
    victory_type TEXT
);

CREATE TABLE IF NOT EXISTS innings (
    innings_id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches(match_id),
    innings_no INTEGER NOT NULL DEFAULT 1 CHECK (innings_no >= 1),
    batting_team_id INTEGER NOT NULL REFERENCES teams(team_id),
    bowling_team_id INTEGER REFERENCES teams(team_id),
    runs INTEGER NOT NULL DEFAULT 0 CHECK (runs >= 0),
    wickets INTEGER NOT NULL DEFAULT 0 CHECK (wickets >= 0),
    overs REAL NOT NULL DEFAULT 0 CHECK (overs >= 0)
);

CREATE TABLE IF NOT EXISTS batting (
    batting_id INTEGER PRIMARY KEY AUTOINCREMENT,
    innings_id INTEGER NOT NULL REFERENCES innings(innings_id),
    player_id INTEGER NOT NULL REFERENCES players(player_id),
    runs INTEGER NOT NULL DEFAULT 0 CHECK (runs >= 0),
    balls INTEGER NOT NULL DEFAULT 0 CHECK (balls >= 0),
    fours INTEGER NOT NULL DEFAULT 0 CHECK (fours >= 0),
    sixes INTEGER NOT NULL DEFAULT 0 CHECK (sixes >= 0),
    dismissal TEXT,
    batting_position INTEGER,
    strike_rate REAL NOT NULL DEFAULT 0 CHECK (strike_rate >= 0)
);

CREATE TABLE IF NOT EXISTS bowling (
    bowling_id INTEGER PRIMARY KEY AUTOINCREMENT,
    innings_id INTEGER NOT NULL REFERENCES innings(innings_id),
    player_id INTEGER NOT NULL REFERENCES players(player_id),
    overs REAL NOT NULL DEFAULT 0 CHECK (overs >= 0),
    maidens INTEGER NOT NULL DEFAULT 0 CHECK (maidens >= 0),
    runs INTEGER NOT NULL DEFAULT 0 CHECK (runs >= 0),
    wickets INTEGER NOT NULL DEFAULT 0 CHECK (wickets >= 0),
    economy REAL NOT NULL DEFAULT 0 CHECK (economy >= 0),
    dots INTEGER NOT NULL DEFAULT 0 CHECK (dots >= 0),
    wides INTEGER NOT NULL DEFAULT 0 CHECK (wides >= 0),
    no_balls INTEGER NOT NULL DEFAULT 0 CHECK (no_balls >= 0)
);

CREATE TABLE IF NOT EXISTS partnerships (
    partnership_id INTEGER PRIMARY KEY AUTOINCREMENT,
    innings_id INTEGER NOT NULL REFERENCES innings(innings_id),
    player_a INTEGER NOT NULL REFERENCES players(player_id),
    player_b INTEGER NOT NULL REFERENCES players(player_id),
    runs INTEGER NOT NULL DEFAULT 0 CHECK (runs >= 0),
    balls INTEGER NOT NULL DEFAULT 0 CHECK (balls >= 0),
    wicket_no INTEGER
);

CREATE TABLE IF NOT EXISTS player_aggregates (
    player_id INTEGER NOT NULL REFERENCES players(player_id),
    format TEXT NOT NULL,
    matches INTEGER NOT NULL DEFAULT 0 CHECK (matches >= 0),
    innings INTEGER NOT NULL DEFAULT 0 CHECK (innings >= 0),
    runs INTEGER NOT NULL DEFAULT 0 CHECK (runs >= 0),
    avg REAL,
    strike_rate REAL,
    hundreds INTEGER NOT NULL DEFAULT 0 CHECK (hundreds >= 0),
    fifties INTEGER NOT NULL DEFAULT 0 CHECK (fifties >= 0),
    high_score INTEGER,
    wickets INTEGER NOT NULL DEFAULT 0 CHECK (wickets >= 0),
    bowling_avg REAL,
    economy REAL,
    catches INTEGER NOT NULL DEFAULT 0 CHECK (catches >= 0),
    stumpings INTEGER NOT NULL DEFAULT 0 CHECK (stumpings >= 0),
    PRIMARY KEY (player_id, format)
);

CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);
CREATE INDEX IF NOT EXISTS idx_matches_date ON matches(date);
CREATE INDEX IF NOT EXISTS idx_innings_match ON innings(match_id);
CREATE INDEX IF NOT EXISTS idx_batting_player ON batting(player_id);
CREATE INDEX IF NOT EXISTS idx_bowling_player ON bowling(player_id);
";

/// Register the SQL functions the analytics catalog relies on.
///
/// SQLite ships without `STDDEV`; the consistency and form queries need the
/// population standard deviation.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_aggregate_function(
        "STDDEV",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        PopulationStdDev,
    )?;
    Ok(())
}

/// Running count / mean / M2 (Welford).
#[derive(Debug, Default)]
struct StdDevState {
    count: u64,
    mean: f64,
    m2: f64,
}

struct PopulationStdDev;

impl Aggregate<StdDevState, Option<f64>> for PopulationStdDev {
    fn init(&self, _ctx: &mut Context<'_>) -> rusqlite::Result<StdDevState> {
        Ok(StdDevState::default())
    }

    fn step(&self, ctx: &mut Context<'_>, state: &mut StdDevState) -> rusqlite::Result<()> {
        // NULLs are ignored, as with every other SQL aggregate
        if let Some(x) = ctx.get::<Option<f64>>(0)? {
            state.count += 1;
            let delta = x - state.mean;
            state.mean += delta / state.count as f64;
            state.m2 += delta * (x - state.mean);
        }
        Ok(())
    }

    fn finalize(
        &self,
        _ctx: &mut Context<'_>,
        state: Option<StdDevState>,
    ) -> rusqlite::Result<Option<f64>> {
        Ok(state
            .filter(|s| s.count > 0)
            .map(|s| (s.m2 / s.count as f64).sqrt()))
    }
}
