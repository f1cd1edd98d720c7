//! Basic database query operations: create, read, update and delete for the
//! six administrable entities plus innings, and the dropdown lookups.

use super::{models::*, schema::CricketDatabase};
use crate::cli::types::{BattingId, BowlingId, InningsId, MatchId, PlayerId, TeamId, VenueId};
use crate::core::table::{Cell, Table};
use crate::{CricError, Result};
use rusqlite::{params, types::ValueRef, OptionalExtension, Row, ToSql};
use tracing::info;

/// Listings never return more than this many rows.
pub const LIST_LIMIT: u32 = 200;
/// Dropdowns over large tables show only the most recent rows.
pub const LOOKUP_LIMIT: u32 = 100;

/// Accumulates `WHERE` clauses and their positional parameters.
#[derive(Default)]
struct Conditions {
    clauses: Vec<&'static str>,
    params: Vec<Box<dyn ToSql>>,
}

impl Conditions {
    fn push(&mut self, clause: &'static str) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    fn bind<T: ToSql + 'static>(&mut self, value: T) -> &mut Self {
        self.params.push(Box::new(value));
        self
    }

    fn sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    fn param_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term.trim())
}

fn search_term(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(like_pattern)
}

pub(crate) fn cell_from(value: ValueRef<'_>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Integer(i) => Cell::Integer(i),
        ValueRef::Real(r) => Cell::Real(r),
        ValueRef::Text(t) => Cell::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Cell::Text(format!("<{} bytes>", b.len())),
    }
}

impl CricketDatabase {
    /// Run any statement and collect its result set as a table.
    pub fn query_table(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Table> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();
        let mut table = Table::new(columns);

        let mut rows = stmt.query(params)?;
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(cell_from(row.get_ref(i)?));
            }
            table.push_row(cells);
        }
        Ok(table)
    }

    /// Execute a multi-statement SQL script, e.g. a data dump.
    pub fn execute_script(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn count(&self, sql: &str, params: &[&dyn ToSql]) -> Result<u64> {
        let n: i64 = self.conn.query_row(sql, params, |row| row.get(0))?;
        Ok(n.max(0) as u64)
    }

    fn exists(&self, table: &str, id_column: &str, id: i64) -> Result<bool> {
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE {id_column} = ?1");
        Ok(self.count(&sql, &[&id])? > 0)
    }

    // ------------------------------------------------------------------
    // Teams
    // ------------------------------------------------------------------

    fn team_name_taken(&self, record: &TeamRecord, except: Option<TeamId>) -> Result<bool> {
        let n = self.count(
            "SELECT COUNT(*) FROM teams
             WHERE (LOWER(name) = LOWER(?1)
                    OR (?2 IS NOT NULL AND LOWER(short_name) = LOWER(?2)))
               AND (?3 IS NULL OR team_id != ?3)",
            &[&record.name, &record.short_name, &except],
        )?;
        Ok(n > 0)
    }

    /// Insert a team. Names and short names are unique, case-insensitively.
    pub fn insert_team(&mut self, record: &TeamRecord) -> Result<TeamId> {
        if self.team_name_taken(record, None)? {
            return Err(CricError::Duplicate {
                entity: "team",
                detail: "name or short name",
            });
        }
        self.conn.execute(
            "INSERT INTO teams (name, country, short_name, logo_url) VALUES (?1, ?2, ?3, ?4)",
            params![record.name, record.country, record.short_name, record.logo_url],
        )?;
        let id = TeamId::new(self.conn.last_insert_rowid());
        info!(%id, name = %record.name, "created team");
        Ok(id)
    }

    pub fn update_team(&mut self, id: TeamId, record: &TeamRecord) -> Result<()> {
        if self.team_name_taken(record, Some(id))? {
            return Err(CricError::Duplicate {
                entity: "team",
                detail: "name or short name",
            });
        }
        let changed = self.conn.execute(
            "UPDATE teams SET name = ?1, country = ?2, short_name = ?3, logo_url = ?4
             WHERE team_id = ?5",
            params![record.name, record.country, record.short_name, record.logo_url, id],
        )?;
        if changed == 0 {
            return Err(CricError::NotFound {
                entity: "team",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    pub fn get_team(&self, id: TeamId) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, name, country, short_name, logo_url FROM teams WHERE team_id = ?1",
                [id],
                |row| {
                    Ok(Team {
                        team_id: row.get(0)?,
                        record: TeamRecord {
                            name: row.get(1)?,
                            country: row.get(2)?,
                            short_name: row.get(3)?,
                            logo_url: row.get(4)?,
                        },
                    })
                },
            )
            .optional()?;
        Ok(team)
    }

    pub fn team_dependents(&self, id: TeamId) -> Result<TeamDependents> {
        Ok(TeamDependents {
            players: self.count("SELECT COUNT(*) FROM players WHERE team_id = ?1", &[&id])?,
            matches: self.count(
                "SELECT COUNT(*) FROM matches WHERE home_team_id = ?1 OR away_team_id = ?1",
                &[&id],
            )?,
        })
    }

    /// Delete a team that no player or match refers to.
    pub fn delete_team(&mut self, id: TeamId) -> Result<()> {
        if !self.exists("teams", "team_id", id.as_i64())? {
            return Err(CricError::NotFound {
                entity: "team",
                id: id.as_i64(),
            });
        }
        let dependents = self.team_dependents(id)?;
        if !dependents.is_empty() {
            return Err(CricError::HasDependents {
                entity: "team",
                id: id.as_i64(),
                dependents: dependents.describe(),
            });
        }
        self.conn
            .execute("DELETE FROM teams WHERE team_id = ?1", [id])?;
        info!(%id, "deleted team");
        Ok(())
    }

    pub fn list_teams(&self, filter: &TeamFilter) -> Result<Table> {
        let mut conditions = Conditions::default();
        if let Some(pattern) = search_term(&filter.search) {
            conditions
                .push("(LOWER(t.name) LIKE LOWER(?) OR LOWER(t.country) LIKE LOWER(?))")
                .bind(pattern.clone())
                .bind(pattern);
        }

        let order = match filter.sort {
            TeamSort::Name => "t.name",
            TeamSort::Country => "t.country, t.name",
            TeamSort::MostPlayers => "player_count DESC, t.name",
            TeamSort::MostMatches => "match_count DESC, t.name",
        };

        let sql = format!(
            "SELECT t.team_id, t.name, t.country, t.short_name,
                    (SELECT COUNT(*) FROM players p WHERE p.team_id = t.team_id) AS player_count,
                    (SELECT COUNT(*) FROM matches m
                      WHERE m.home_team_id = t.team_id OR m.away_team_id = t.team_id) AS match_count
             FROM teams t{}
             ORDER BY {}",
            conditions.sql(),
            order
        );
        self.query_table(&sql, &conditions.param_refs())
    }

    // ------------------------------------------------------------------
    // Venues
    // ------------------------------------------------------------------

    fn venue_name_taken(&self, record: &VenueRecord, except: Option<VenueId>) -> Result<bool> {
        let n = self.count(
            "SELECT COUNT(*) FROM venues
             WHERE LOWER(name) = LOWER(?1)
               AND LOWER(COALESCE(city, '')) = LOWER(COALESCE(?2, ''))
               AND (?3 IS NULL OR venue_id != ?3)",
            &[&record.name, &record.city, &except],
        )?;
        Ok(n > 0)
    }

    /// Insert a venue. (name, city) is unique, case-insensitively.
    pub fn insert_venue(&mut self, record: &VenueRecord) -> Result<VenueId> {
        if self.venue_name_taken(record, None)? {
            return Err(CricError::Duplicate {
                entity: "venue",
                detail: "name in the same city",
            });
        }
        self.conn.execute(
            "INSERT INTO venues (name, city, country, capacity, established)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.name,
                record.city,
                record.country,
                record.capacity,
                record.established
            ],
        )?;
        let id = VenueId::new(self.conn.last_insert_rowid());
        info!(%id, name = %record.name, "created venue");
        Ok(id)
    }

    pub fn update_venue(&mut self, id: VenueId, record: &VenueRecord) -> Result<()> {
        if self.venue_name_taken(record, Some(id))? {
            return Err(CricError::Duplicate {
                entity: "venue",
                detail: "name in the same city",
            });
        }
        let changed = self.conn.execute(
            "UPDATE venues SET name = ?1, city = ?2, country = ?3, capacity = ?4, established = ?5
             WHERE venue_id = ?6",
            params![
                record.name,
                record.city,
                record.country,
                record.capacity,
                record.established,
                id
            ],
        )?;
        if changed == 0 {
            return Err(CricError::NotFound {
                entity: "venue",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    pub fn get_venue(&self, id: VenueId) -> Result<Option<Venue>> {
        let venue = self
            .conn
            .query_row(
                "SELECT venue_id, name, city, country, capacity, established
                 FROM venues WHERE venue_id = ?1",
                [id],
                |row| {
                    Ok(Venue {
                        venue_id: row.get(0)?,
                        record: VenueRecord {
                            name: row.get(1)?,
                            city: row.get(2)?,
                            country: row.get(3)?,
                            capacity: row.get(4)?,
                            established: row.get(5)?,
                        },
                    })
                },
            )
            .optional()?;
        Ok(venue)
    }

    pub fn venue_match_count(&self, id: VenueId) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM matches WHERE venue_id = ?1", &[&id])
    }

    /// Delete a venue no match is played at.
    pub fn delete_venue(&mut self, id: VenueId) -> Result<()> {
        if !self.exists("venues", "venue_id", id.as_i64())? {
            return Err(CricError::NotFound {
                entity: "venue",
                id: id.as_i64(),
            });
        }
        let matches = self.venue_match_count(id)?;
        if matches > 0 {
            return Err(CricError::HasDependents {
                entity: "venue",
                id: id.as_i64(),
                dependents: format!("{} matches", matches),
            });
        }
        self.conn
            .execute("DELETE FROM venues WHERE venue_id = ?1", [id])?;
        info!(%id, "deleted venue");
        Ok(())
    }

    pub fn list_venues(&self, filter: &VenueFilter) -> Result<Table> {
        let mut conditions = Conditions::default();
        if let Some(pattern) = search_term(&filter.search) {
            conditions
                .push("(LOWER(v.name) LIKE LOWER(?) OR LOWER(COALESCE(v.city, '')) LIKE LOWER(?))")
                .bind(pattern.clone())
                .bind(pattern);
        }
        if let Some(min) = filter.min_capacity.filter(|m| *m > 0) {
            conditions.push("v.capacity >= ?").bind(min);
        }
        if let Some(pattern) = search_term(&filter.country) {
            conditions
                .push("LOWER(COALESCE(v.country, '')) LIKE LOWER(?)")
                .bind(pattern);
        }

        let sql = format!(
            "SELECT v.venue_id, v.name, v.city, v.country, v.capacity, v.established,
                    COUNT(m.match_id) AS match_count
             FROM venues v
             LEFT JOIN matches m ON v.venue_id = m.venue_id{}
             GROUP BY v.venue_id, v.name, v.city, v.country, v.capacity, v.established
             ORDER BY v.capacity IS NULL, v.capacity DESC, v.name",
            conditions.sql()
        );
        self.query_table(&sql, &conditions.param_refs())
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    pub fn insert_player(&mut self, record: &PlayerRecord) -> Result<PlayerId> {
        self.conn.execute(
            "INSERT INTO players
             (full_name, short_name, team_id, country, role, batting_style, bowling_style, dob)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.full_name,
                record.short_name,
                record.team_id,
                record.country,
                record.role,
                record.batting_style,
                record.bowling_style,
                record.dob
            ],
        )?;
        let id = PlayerId::new(self.conn.last_insert_rowid());
        info!(%id, name = %record.full_name, "created player");
        Ok(id)
    }

    pub fn update_player(&mut self, id: PlayerId, record: &PlayerRecord) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE players SET
                full_name = ?1, short_name = ?2, team_id = ?3, country = ?4, role = ?5,
                batting_style = ?6, bowling_style = ?7, dob = ?8
             WHERE player_id = ?9",
            params![
                record.full_name,
                record.short_name,
                record.team_id,
                record.country,
                record.role,
                record.batting_style,
                record.bowling_style,
                record.dob,
                id
            ],
        )?;
        if changed == 0 {
            return Err(CricError::NotFound {
                entity: "player",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    pub fn get_player(&self, id: PlayerId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                "SELECT player_id, full_name, short_name, team_id, country, role,
                        batting_style, bowling_style, dob
                 FROM players WHERE player_id = ?1",
                [id],
                row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    pub fn player_dependents(&self, id: PlayerId) -> Result<PlayerDependents> {
        Ok(PlayerDependents {
            batting: self.count("SELECT COUNT(*) FROM batting WHERE player_id = ?1", &[&id])?,
            bowling: self.count("SELECT COUNT(*) FROM bowling WHERE player_id = ?1", &[&id])?,
            partnerships: self.count(
                "SELECT COUNT(*) FROM partnerships WHERE player_a = ?1 OR player_b = ?1",
                &[&id],
            )?,
            aggregates: self.count(
                "SELECT COUNT(*) FROM player_aggregates WHERE player_id = ?1",
                &[&id],
            )?,
        })
    }

    /// Delete a player together with every statistics row that names them.
    ///
    /// Returns what was removed alongside the player.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<PlayerDependents> {
        if !self.exists("players", "player_id", id.as_i64())? {
            return Err(CricError::NotFound {
                entity: "player",
                id: id.as_i64(),
            });
        }
        let removed = self.player_dependents(id)?;

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM batting WHERE player_id = ?1", [id])?;
        tx.execute("DELETE FROM bowling WHERE player_id = ?1", [id])?;
        tx.execute(
            "DELETE FROM partnerships WHERE player_a = ?1 OR player_b = ?1",
            [id],
        )?;
        tx.execute("DELETE FROM player_aggregates WHERE player_id = ?1", [id])?;
        tx.execute("DELETE FROM players WHERE player_id = ?1", [id])?;
        tx.commit()?;

        info!(%id, ?removed, "deleted player");
        Ok(removed)
    }

    pub fn list_players(&self, filter: &PlayerFilter) -> Result<Table> {
        let mut conditions = Conditions::default();
        if let Some(pattern) = search_term(&filter.search) {
            conditions
                .push("(LOWER(p.full_name) LIKE LOWER(?) OR LOWER(COALESCE(p.country, '')) LIKE LOWER(?))")
                .bind(pattern.clone())
                .bind(pattern);
        }
        if let Some(team) = filter.team.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            conditions.push("t.name = ?").bind(team.to_string());
        }
        if let Some(role) = filter.role {
            conditions.push("p.role = ?").bind(role);
        }

        let sql = format!(
            "SELECT p.player_id, p.full_name, p.short_name, p.country, p.role,
                    p.batting_style, p.bowling_style, p.dob, t.name AS team_name
             FROM players p
             LEFT JOIN teams t ON p.team_id = t.team_id{}
             ORDER BY p.full_name
             LIMIT {}",
            conditions.sql(),
            LIST_LIMIT
        );
        self.query_table(&sql, &conditions.param_refs())
    }

    // ------------------------------------------------------------------
    // Matches
    // ------------------------------------------------------------------

    pub fn insert_match(&mut self, record: &MatchRecord) -> Result<MatchId> {
        self.conn.execute(
            "INSERT INTO matches
             (series_id, description, date, venue_id, home_team_id, away_team_id, status,
              winner_team_id, toss_winner_id, toss_decision, victory_margin, victory_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                record.series_id,
                record.description,
                record.date,
                record.venue_id,
                record.home_team_id,
                record.away_team_id,
                record.status,
                record.winner_team_id,
                record.toss_winner_id,
                record.toss_decision,
                record.victory_margin,
                record.victory_type
            ],
        )?;
        let id = MatchId::new(self.conn.last_insert_rowid());
        info!(%id, description = %record.description, "created match");
        Ok(id)
    }

    pub fn update_match(&mut self, id: MatchId, record: &MatchRecord) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE matches SET
                series_id = ?1, description = ?2, date = ?3, venue_id = ?4,
                home_team_id = ?5, away_team_id = ?6, status = ?7, winner_team_id = ?8,
                toss_winner_id = ?9, toss_decision = ?10, victory_margin = ?11, victory_type = ?12
             WHERE match_id = ?13",
            params![
                record.series_id,
                record.description,
                record.date,
                record.venue_id,
                record.home_team_id,
                record.away_team_id,
                record.status,
                record.winner_team_id,
                record.toss_winner_id,
                record.toss_decision,
                record.victory_margin,
                record.victory_type,
                id
            ],
        )?;
        if changed == 0 {
            return Err(CricError::NotFound {
                entity: "match",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    pub fn get_match(&self, id: MatchId) -> Result<Option<Match>> {
        let found = self
            .conn
            .query_row(
                "SELECT match_id, series_id, description, date, venue_id, home_team_id,
                        away_team_id, status, winner_team_id, toss_winner_id, toss_decision,
                        victory_margin, victory_type
                 FROM matches WHERE match_id = ?1",
                [id],
                |row| {
                    Ok(Match {
                        match_id: row.get(0)?,
                        record: MatchRecord {
                            series_id: row.get(1)?,
                            description: row.get(2)?,
                            date: row.get(3)?,
                            venue_id: row.get(4)?,
                            home_team_id: row.get(5)?,
                            away_team_id: row.get(6)?,
                            status: row.get(7)?,
                            winner_team_id: row.get(8)?,
                            toss_winner_id: row.get(9)?,
                            toss_decision: row.get(10)?,
                            victory_margin: row.get(11)?,
                            victory_type: row.get(12)?,
                        },
                    })
                },
            )
            .optional()?;
        Ok(found)
    }

    pub fn match_dependents(&self, id: MatchId) -> Result<MatchDependents> {
        const IN_MATCH: &str = "innings_id IN (SELECT innings_id FROM innings WHERE match_id = ?1)";
        Ok(MatchDependents {
            innings: self.count("SELECT COUNT(*) FROM innings WHERE match_id = ?1", &[&id])?,
            batting: self.count(&format!("SELECT COUNT(*) FROM batting WHERE {IN_MATCH}"), &[&id])?,
            bowling: self.count(&format!("SELECT COUNT(*) FROM bowling WHERE {IN_MATCH}"), &[&id])?,
            partnerships: self.count(
                &format!("SELECT COUNT(*) FROM partnerships WHERE {IN_MATCH}"),
                &[&id],
            )?,
        })
    }

    /// Delete a match together with its innings and their statistics rows.
    pub fn delete_match(&mut self, id: MatchId) -> Result<MatchDependents> {
        if !self.exists("matches", "match_id", id.as_i64())? {
            return Err(CricError::NotFound {
                entity: "match",
                id: id.as_i64(),
            });
        }
        let removed = self.match_dependents(id)?;

        let tx = self.conn.transaction()?;
        for table in ["batting", "bowling", "partnerships"] {
            tx.execute(
                &format!(
                    "DELETE FROM {table}
                     WHERE innings_id IN (SELECT innings_id FROM innings WHERE match_id = ?1)"
                ),
                [id],
            )?;
        }
        tx.execute("DELETE FROM innings WHERE match_id = ?1", [id])?;
        tx.execute("DELETE FROM matches WHERE match_id = ?1", [id])?;
        tx.commit()?;

        info!(%id, ?removed, "deleted match");
        Ok(removed)
    }

    pub fn list_matches(&self, filter: &MatchFilter) -> Result<Table> {
        let mut conditions = Conditions::default();
        if let Some(pattern) = search_term(&filter.search) {
            conditions
                .push("(LOWER(m.description) LIKE LOWER(?)
                  OR LOWER(COALESCE(home.name, '')) LIKE LOWER(?)
                  OR LOWER(COALESCE(away.name, '')) LIKE LOWER(?))")
                .bind(pattern.clone())
                .bind(pattern.clone())
                .bind(pattern);
        }
        if let Some(status) = filter.status {
            conditions.push("m.status = ?").bind(status);
        }

        let sql = format!(
            "SELECT m.match_id, m.description, m.date, m.status,
                    s.name AS series_name, v.name AS venue_name,
                    home.name AS home_team, away.name AS away_team,
                    wt.name AS winner
             FROM matches m
             LEFT JOIN series s ON m.series_id = s.series_id
             LEFT JOIN venues v ON m.venue_id = v.venue_id
             LEFT JOIN teams home ON m.home_team_id = home.team_id
             LEFT JOIN teams away ON m.away_team_id = away.team_id
             LEFT JOIN teams wt ON m.winner_team_id = wt.team_id{}
             ORDER BY m.date DESC, m.match_id DESC
             LIMIT {}",
            conditions.sql(),
            LIST_LIMIT
        );
        self.query_table(&sql, &conditions.param_refs())
    }

    // ------------------------------------------------------------------
    // Innings
    // ------------------------------------------------------------------

    pub fn insert_innings(&mut self, record: &InningsRecord) -> Result<InningsId> {
        self.conn.execute(
            "INSERT INTO innings
             (match_id, innings_no, batting_team_id, bowling_team_id, runs, wickets, overs)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.match_id,
                record.innings_no,
                record.batting_team_id,
                record.bowling_team_id,
                record.runs,
                record.wickets,
                record.overs
            ],
        )?;
        let id = InningsId::new(self.conn.last_insert_rowid());
        info!(%id, match_id = %record.match_id, "created innings");
        Ok(id)
    }

    pub fn get_innings(&self, id: InningsId) -> Result<Option<Innings>> {
        let innings = self
            .conn
            .query_row(
                "SELECT innings_id, match_id, innings_no, batting_team_id, bowling_team_id,
                        runs, wickets, overs
                 FROM innings WHERE innings_id = ?1",
                [id],
                |row| {
                    Ok(Innings {
                        innings_id: row.get(0)?,
                        record: InningsRecord {
                            match_id: row.get(1)?,
                            innings_no: row.get(2)?,
                            batting_team_id: row.get(3)?,
                            bowling_team_id: row.get(4)?,
                            runs: row.get(5)?,
                            wickets: row.get(6)?,
                            overs: row.get(7)?,
                        },
                    })
                },
            )
            .optional()?;
        Ok(innings)
    }

    pub fn list_innings(&self, match_id: Option<MatchId>) -> Result<Table> {
        let mut conditions = Conditions::default();
        if let Some(id) = match_id {
            conditions.push("i.match_id = ?").bind(id);
        }
        let sql = format!(
            "SELECT i.innings_id, i.match_id, m.description AS match_info, i.innings_no,
                    bt.name AS batting_team, i.runs, i.wickets, i.overs
             FROM innings i
             JOIN matches m ON i.match_id = m.match_id
             JOIN teams bt ON i.batting_team_id = bt.team_id{}
             ORDER BY i.innings_id DESC
             LIMIT {}",
            conditions.sql(),
            LIST_LIMIT
        );
        self.query_table(&sql, &conditions.param_refs())
    }

    // ------------------------------------------------------------------
    // Batting
    // ------------------------------------------------------------------

    pub fn insert_batting(&mut self, record: &BattingRecord) -> Result<BattingId> {
        self.conn.execute(
            "INSERT INTO batting
             (innings_id, player_id, runs, balls, fours, sixes, dismissal, batting_position, strike_rate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.innings_id,
                record.player_id,
                record.runs,
                record.balls,
                record.fours,
                record.sixes,
                record.dismissal,
                record.batting_position,
                record.strike_rate
            ],
        )?;
        let id = BattingId::new(self.conn.last_insert_rowid());
        info!(%id, player_id = %record.player_id, "created batting record");
        Ok(id)
    }

    pub fn update_batting(&mut self, id: BattingId, record: &BattingRecord) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE batting SET
                innings_id = ?1, player_id = ?2, runs = ?3, balls = ?4, fours = ?5, sixes = ?6,
                dismissal = ?7, batting_position = ?8, strike_rate = ?9
             WHERE batting_id = ?10",
            params![
                record.innings_id,
                record.player_id,
                record.runs,
                record.balls,
                record.fours,
                record.sixes,
                record.dismissal,
                record.batting_position,
                record.strike_rate,
                id
            ],
        )?;
        if changed == 0 {
            return Err(CricError::NotFound {
                entity: "batting record",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    pub fn get_batting(&self, id: BattingId) -> Result<Option<Batting>> {
        let batting = self
            .conn
            .query_row(
                "SELECT batting_id, innings_id, player_id, runs, balls, fours, sixes,
                        dismissal, batting_position, strike_rate
                 FROM batting WHERE batting_id = ?1",
                [id],
                |row| {
                    Ok(Batting {
                        batting_id: row.get(0)?,
                        record: BattingRecord {
                            innings_id: row.get(1)?,
                            player_id: row.get(2)?,
                            runs: row.get(3)?,
                            balls: row.get(4)?,
                            fours: row.get(5)?,
                            sixes: row.get(6)?,
                            dismissal: row.get(7)?,
                            batting_position: row.get(8)?,
                            strike_rate: row.get(9)?,
                        },
                    })
                },
            )
            .optional()?;
        Ok(batting)
    }

    pub fn delete_batting(&mut self, id: BattingId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM batting WHERE batting_id = ?1", [id])?;
        if removed == 0 {
            return Err(CricError::NotFound {
                entity: "batting record",
                id: id.as_i64(),
            });
        }
        info!(%id, "deleted batting record");
        Ok(())
    }

    pub fn list_batting(&self, filter: &BattingFilter) -> Result<Table> {
        let mut conditions = Conditions::default();
        if let Some(pattern) = search_term(&filter.search) {
            conditions
                .push("(LOWER(p.full_name) LIKE LOWER(?) OR LOWER(m.description) LIKE LOWER(?))")
                .bind(pattern.clone())
                .bind(pattern);
        }
        if let Some(min) = filter.min_runs.filter(|m| *m > 0) {
            conditions.push("b.runs >= ?").bind(min);
        }

        let sql = format!(
            "SELECT b.batting_id, p.full_name AS player_name, t.name AS team_name,
                    i.match_id, m.description AS match_description, b.innings_id,
                    b.runs, b.balls, b.fours, b.sixes, b.strike_rate,
                    b.dismissal, b.batting_position
             FROM batting b
             JOIN players p ON b.player_id = p.player_id
             JOIN innings i ON b.innings_id = i.innings_id
             JOIN matches m ON i.match_id = m.match_id
             LEFT JOIN teams t ON p.team_id = t.team_id{}
             ORDER BY b.runs DESC, b.batting_id
             LIMIT {}",
            conditions.sql(),
            LIST_LIMIT
        );
        self.query_table(&sql, &conditions.param_refs())
    }

    // ------------------------------------------------------------------
    // Bowling
    // ------------------------------------------------------------------

    pub fn insert_bowling(&mut self, record: &BowlingRecord) -> Result<BowlingId> {
        self.conn.execute(
            "INSERT INTO bowling
             (innings_id, player_id, overs, maidens, runs, wickets, economy, dots, wides, no_balls)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                record.innings_id,
                record.player_id,
                record.overs,
                record.maidens,
                record.runs,
                record.wickets,
                record.economy,
                record.dots,
                record.wides,
                record.no_balls
            ],
        )?;
        let id = BowlingId::new(self.conn.last_insert_rowid());
        info!(%id, player_id = %record.player_id, "created bowling record");
        Ok(id)
    }

    pub fn update_bowling(&mut self, id: BowlingId, record: &BowlingRecord) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE bowling SET
                innings_id = ?1, player_id = ?2, overs = ?3, maidens = ?4, runs = ?5,
                wickets = ?6, economy = ?7, dots = ?8, wides = ?9, no_balls = ?10
             WHERE bowling_id = ?11",
            params![
                record.innings_id,
                record.player_id,
                record.overs,
                record.maidens,
                record.runs,
                record.wickets,
                record.economy,
                record.dots,
                record.wides,
                record.no_balls,
                id
            ],
        )?;
        if changed == 0 {
            return Err(CricError::NotFound {
                entity: "bowling record",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    pub fn get_bowling(&self, id: BowlingId) -> Result<Option<Bowling>> {
        let bowling = self
            .conn
            .query_row(
                "SELECT bowling_id, innings_id, player_id, overs, maidens, runs, wickets,
                        economy, dots, wides, no_balls
                 FROM bowling WHERE bowling_id = ?1",
                [id],
                |row| {
                    Ok(Bowling {
                        bowling_id: row.get(0)?,
                        record: BowlingRecord {
                            innings_id: row.get(1)?,
                            player_id: row.get(2)?,
                            overs: row.get(3)?,
                            maidens: row.get(4)?,
                            runs: row.get(5)?,
                            wickets: row.get(6)?,
                            economy: row.get(7)?,
                            dots: row.get(8)?,
                            wides: row.get(9)?,
                            no_balls: row.get(10)?,
                        },
                    })
                },
            )
            .optional()?;
        Ok(bowling)
    }

    pub fn delete_bowling(&mut self, id: BowlingId) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM bowling WHERE bowling_id = ?1", [id])?;
        if removed == 0 {
            return Err(CricError::NotFound {
                entity: "bowling record",
                id: id.as_i64(),
            });
        }
        info!(%id, "deleted bowling record");
        Ok(())
    }

    pub fn list_bowling(&self, filter: &BowlingFilter) -> Result<Table> {
        let mut conditions = Conditions::default();
        if let Some(pattern) = search_term(&filter.search) {
            conditions
                .push("(LOWER(p.full_name) LIKE LOWER(?) OR LOWER(m.description) LIKE LOWER(?))")
                .bind(pattern.clone())
                .bind(pattern);
        }
        if let Some(min) = filter.min_wickets.filter(|m| *m > 0) {
            conditions.push("b.wickets >= ?").bind(min);
        }
        if let Some(max) = filter.max_economy {
            conditions.push("b.economy <= ?").bind(max);
        }

        let sql = format!(
            "SELECT b.bowling_id, p.full_name AS player_name, t.name AS team_name,
                    i.match_id, m.description AS match_description, m.date AS match_date,
                    b.innings_id, b.overs, b.maidens, b.runs, b.wickets, b.economy,
                    b.dots, b.wides, b.no_balls
             FROM bowling b
             JOIN players p ON b.player_id = p.player_id
             JOIN innings i ON b.innings_id = i.innings_id
             JOIN matches m ON i.match_id = m.match_id
             LEFT JOIN teams t ON p.team_id = t.team_id{}
             ORDER BY b.wickets DESC, b.economy ASC, b.bowling_id
             LIMIT {}",
            conditions.sql(),
            LIST_LIMIT
        );
        self.query_table(&sql, &conditions.param_refs())
    }

    // ------------------------------------------------------------------
    // Dropdown lookups
    // ------------------------------------------------------------------

    fn lookup(&self, sql: &str) -> Result<Vec<LookupEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(LookupEntry {
                id: row.get(0)?,
                label: row.get(1)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    pub fn lookup_teams(&self) -> Result<Vec<LookupEntry>> {
        self.lookup("SELECT team_id, name FROM teams ORDER BY name")
    }

    pub fn lookup_players(&self) -> Result<Vec<LookupEntry>> {
        self.lookup("SELECT player_id, full_name FROM players ORDER BY full_name")
    }

    pub fn lookup_venues(&self) -> Result<Vec<LookupEntry>> {
        self.lookup("SELECT venue_id, name FROM venues ORDER BY name")
    }

    pub fn lookup_series(&self) -> Result<Vec<LookupEntry>> {
        self.lookup("SELECT series_id, name FROM series ORDER BY name")
    }

    pub fn lookup_matches(&self) -> Result<Vec<LookupEntry>> {
        self.lookup(&format!(
            "SELECT match_id, description FROM matches ORDER BY date DESC, match_id DESC LIMIT {}",
            LOOKUP_LIMIT
        ))
    }

    pub fn lookup_innings(&self) -> Result<Vec<LookupEntry>> {
        self.lookup(&format!(
            "SELECT i.innings_id, m.description || ' - ' || t.name
             FROM innings i
             JOIN matches m ON i.match_id = m.match_id
             JOIN teams t ON i.batting_team_id = t.team_id
             ORDER BY i.innings_id DESC
             LIMIT {}",
            LOOKUP_LIMIT
        ))
    }
}

fn row_to_player(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        player_id: row.get(0)?,
        record: PlayerRecord {
            full_name: row.get(1)?,
            short_name: row.get(2)?,
            team_id: row.get(3)?,
            country: row.get(4)?,
            role: row.get(5)?,
            batting_style: row.get(6)?,
            bowling_style: row.get(7)?,
            dob: row.get(8)?,
        },
    })
}

/// Total wickets and best figures over a bowling listing.
///
/// Best figures are the most wickets, ties going to the row listed first
/// (i.e. the more economical spell).
pub fn summarize_bowling(table: &Table) -> Option<BowlingSummary> {
    let wickets_idx = table.column_index("wickets")?;
    let runs_idx = table.column_index("runs")?;
    let name_idx = table.column_index("player_name")?;

    let as_int = |cell: &Cell| match cell {
        Cell::Integer(i) => *i,
        other => other.as_f64().unwrap_or(0.0) as i64,
    };

    let mut total = 0;
    let mut best: Option<&Vec<Cell>> = None;
    for row in &table.rows {
        let w = as_int(&row[wickets_idx]);
        total += w;
        if best.map_or(true, |b| w > as_int(&b[wickets_idx])) {
            best = Some(row);
        }
    }

    best.map(|row| BowlingSummary {
        total_wickets: total,
        best_player: row[name_idx].to_string(),
        best_wickets: as_int(&row[wickets_idx]),
        best_runs: as_int(&row[runs_idx]),
    })
}
