//! Admin page: CRUD over the cricket database.
//!
//! Create validates the form and inserts. Update loads the stored row, lays
//! the supplied flags over it and validates the result like a create. Delete
//! only previews the affected rows unless `--yes` is given.

use crate::{
    cli::{
        AdminCmd, BattingCmd, BowlingCmd, InningsCmd, LookupKind, MatchesCmd, PlayersCmd,
        TeamsCmd, VenuesCmd,
    },
    forms::{BattingForm, BowlingForm, MatchForm, PlayerForm, TeamForm, VenueForm},
    storage::{
        summarize_bowling, BattingFilter, BowlingFilter, CricketDatabase, MatchFilter,
        PlayerFilter, TeamFilter, VenueFilter,
    },
    CricError, Result,
};

use super::{
    common::{emit_table, print_record},
    CommandContext,
};


const CONFIRM_HINT: &str = "Re-run with --yes to delete.";

fn found<T>(value: Option<T>, entity: &'static str, id: i64) -> Result<T> {
    value.ok_or(CricError::NotFound { entity, id })
}

/// Dispatch an admin subcommand against the configured database.
pub fn handle_admin(ctx: &CommandContext, cmd: AdminCmd) -> Result<()> {
    let mut db = ctx.database()?;
    match cmd {
        AdminCmd::Players { cmd } => handle_players(&mut db, cmd),
        AdminCmd::Matches { cmd } => handle_matches(&mut db, cmd),
        AdminCmd::Innings { cmd } => handle_innings(&mut db, cmd),
        AdminCmd::Batting { cmd } => handle_batting(&mut db, cmd),
        AdminCmd::Bowling { cmd } => handle_bowling(&mut db, cmd),
        AdminCmd::Teams { cmd } => handle_teams(&mut db, cmd),
        AdminCmd::Venues { cmd } => handle_venues(&mut db, cmd),
        AdminCmd::Lookup { kind } => handle_lookup(&db, kind),
    }
}

pub fn handle_players(db: &mut CricketDatabase, cmd: PlayersCmd) -> Result<()> {
    match cmd {
        PlayersCmd::Create { form } => {
            let record = form.validate()?;
            let id = db.insert_player(&record)?;
            println!("✓ Player '{}' added with id {}", record.full_name, id);
        }
        PlayersCmd::List {
            search,
            team,
            role,
            output,
        } => {
            let table = db.list_players(&PlayerFilter { search, team, role })?;
            emit_table(&table, "Players", &output)?;
        }
        PlayersCmd::Update { id, form } => {
            let stored = found(db.get_player(id)?, "player", id.as_i64())?;
            let record = form.merged_over(PlayerForm::from(&stored.record)).validate()?;
            db.update_player(id, &record)?;
            println!("✓ Player '{}' updated", record.full_name);
        }
        PlayersCmd::Delete { id, yes } => {
            let stored = found(db.get_player(id)?, "player", id.as_i64())?;
            if !yes {
                print_record(&stored)?;
                let deps = db.player_dependents(id)?;
                if !deps.is_empty() {
                    println!(
                        "Also removes {} batting, {} bowling, {} partnership and {} aggregate rows.",
                        deps.batting, deps.bowling, deps.partnerships, deps.aggregates
                    );
                }
                println!("{}", CONFIRM_HINT);
                return Ok(());
            }
            let removed = db.delete_player(id)?;
            println!(
                "✓ Player '{}' deleted ({} batting, {} bowling, {} partnership rows removed)",
                stored.record.full_name, removed.batting, removed.bowling, removed.partnerships
            );
        }
    }
    Ok(())
}

pub fn handle_matches(db: &mut CricketDatabase, cmd: MatchesCmd) -> Result<()> {
    match cmd {
        MatchesCmd::Create { form } => {
            let record = form.validate()?;
            let id = db.insert_match(&record)?;
            println!("✓ Match '{}' added with id {}", record.description, id);
        }
        MatchesCmd::List {
            search,
            status,
            output,
        } => {
            let table = db.list_matches(&MatchFilter { search, status })?;
            emit_table(&table, "Matches", &output)?;
        }
        MatchesCmd::Update { id, form } => {
            let stored = found(db.get_match(id)?, "match", id.as_i64())?;
            let record = form.merged_over(MatchForm::from(&stored.record)).validate()?;
            db.update_match(id, &record)?;
            println!("✓ Match '{}' updated", record.description);
        }
        MatchesCmd::Delete { id, yes } => {
            let stored = found(db.get_match(id)?, "match", id.as_i64())?;
            if !yes {
                print_record(&stored)?;
                let deps = db.match_dependents(id)?;
                if !deps.is_empty() {
                    println!(
                        "Also removes {} innings with {} batting, {} bowling and {} partnership rows.",
                        deps.innings, deps.batting, deps.bowling, deps.partnerships
                    );
                }
                println!("{}", CONFIRM_HINT);
                return Ok(());
            }
            let removed = db.delete_match(id)?;
            println!(
                "✓ Match '{}' deleted ({} innings removed)",
                stored.record.description, removed.innings
            );
        }
    }
    Ok(())
}

pub fn handle_innings(db: &mut CricketDatabase, cmd: InningsCmd) -> Result<()> {
    match cmd {
        InningsCmd::Create { form } => {
            let record = form.validate()?;
            found(db.get_match(record.match_id)?, "match", record.match_id.as_i64())?;
            let id = db.insert_innings(&record)?;
            println!(
                "✓ Innings {} of match {} added with id {}",
                record.innings_no, record.match_id, id
            );
        }
        InningsCmd::List { match_id, output } => {
            let table = db.list_innings(match_id)?;
            emit_table(&table, "Innings", &output)?;
        }
    }
    Ok(())
}

pub fn handle_batting(db: &mut CricketDatabase, cmd: BattingCmd) -> Result<()> {
    match cmd {
        BattingCmd::Create { form } => {
            let record = form.validate()?;
            let id = db.insert_batting(&record)?;
            println!(
                "✓ Batting record added with id {} ({} off {}, SR {:.2})",
                id, record.runs, record.balls, record.strike_rate
            );
        }
        BattingCmd::List {
            search,
            min_runs,
            output,
        } => {
            let table = db.list_batting(&BattingFilter { search, min_runs })?;
            emit_table(&table, "Batting", &output)?;
        }
        BattingCmd::Update { id, form } => {
            let stored = found(db.get_batting(id)?, "batting record", id.as_i64())?;
            let record = form.merged_over(BattingForm::from(&stored.record)).validate()?;
            db.update_batting(id, &record)?;
            println!("✓ Batting record {} updated (SR {:.2})", id, record.strike_rate);
        }
        BattingCmd::Delete { id, yes } => {
            let stored = found(db.get_batting(id)?, "batting record", id.as_i64())?;
            if !yes {
                print_record(&stored)?;
                println!("{}", CONFIRM_HINT);
                return Ok(());
            }
            db.delete_batting(id)?;
            println!("✓ Batting record {} deleted", id);
        }
    }
    Ok(())
}

pub fn handle_bowling(db: &mut CricketDatabase, cmd: BowlingCmd) -> Result<()> {
    match cmd {
        BowlingCmd::Create { form } => {
            let record = form.validate()?;
            let id = db.insert_bowling(&record)?;
            println!(
                "✓ Bowling record added with id {} ({}/{} in {} overs, econ {:.2})",
                id, record.wickets, record.runs, record.overs, record.economy
            );
        }
        BowlingCmd::List {
            search,
            min_wickets,
            max_economy,
            output,
        } => {
            let table = db.list_bowling(&BowlingFilter {
                search,
                min_wickets,
                max_economy,
            })?;
            emit_table(&table, "Bowling", &output)?;
            if !output.json {
                if let Some(summary) = summarize_bowling(&table) {
                    println!();
                    println!("Total wickets: {}", summary.total_wickets);
                    println!(
                        "Best figures:  {} {}/{}",
                        summary.best_player, summary.best_wickets, summary.best_runs
                    );
                }
            }
        }
        BowlingCmd::Update { id, form } => {
            let stored = found(db.get_bowling(id)?, "bowling record", id.as_i64())?;
            let record = form.merged_over(BowlingForm::from(&stored.record)).validate()?;
            db.update_bowling(id, &record)?;
            println!("✓ Bowling record {} updated (econ {:.2})", id, record.economy);
        }
        BowlingCmd::Delete { id, yes } => {
            let stored = found(db.get_bowling(id)?, "bowling record", id.as_i64())?;
            if !yes {
                print_record(&stored)?;
                println!("{}", CONFIRM_HINT);
                return Ok(());
            }
            db.delete_bowling(id)?;
            println!("✓ Bowling record {} deleted", id);
        }
    }
    Ok(())
}

pub fn handle_teams(db: &mut CricketDatabase, cmd: TeamsCmd) -> Result<()> {
    match cmd {
        TeamsCmd::Create { form } => {
            let record = form.validate()?;
            let id = db.insert_team(&record)?;
            println!("✓ Team '{}' added with id {}", record.name, id);
        }
        TeamsCmd::List {
            search,
            sort,
            output,
        } => {
            let table = db.list_teams(&TeamFilter {
                search,
                sort: sort.into(),
            })?;
            emit_table(&table, "Teams", &output)?;
        }
        TeamsCmd::Update { id, form } => {
            let stored = found(db.get_team(id)?, "team", id.as_i64())?;
            let record = form.merged_over(TeamForm::from(&stored.record)).validate()?;
            db.update_team(id, &record)?;
            println!("✓ Team '{}' updated", record.name);
        }
        TeamsCmd::Delete { id, yes } => {
            let stored = found(db.get_team(id)?, "team", id.as_i64())?;
            if !yes {
                print_record(&stored)?;
                let deps = db.team_dependents(id)?;
                if !deps.is_empty() {
                    println!(
                        "Cannot be deleted while it has {} associated.",
                        deps.describe()
                    );
                    return Ok(());
                }
                println!("{}", CONFIRM_HINT);
                return Ok(());
            }
            db.delete_team(id)?;
            println!("✓ Team '{}' deleted", stored.record.name);
        }
    }
    Ok(())
}

pub fn handle_venues(db: &mut CricketDatabase, cmd: VenuesCmd) -> Result<()> {
    match cmd {
        VenuesCmd::Create { form } => {
            let record = form.validate()?;
            let id = db.insert_venue(&record)?;
            println!("✓ Venue '{}' added with id {}", record.name, id);
        }
        VenuesCmd::List {
            search,
            min_capacity,
            country,
            output,
        } => {
            let table = db.list_venues(&VenueFilter {
                search,
                min_capacity,
                country,
            })?;
            emit_table(&table, "Venues", &output)?;
        }
        VenuesCmd::Update { id, form } => {
            let stored = found(db.get_venue(id)?, "venue", id.as_i64())?;
            let record = form.merged_over(VenueForm::from(&stored.record)).validate()?;
            db.update_venue(id, &record)?;
            println!("✓ Venue '{}' updated", record.name);
        }
        VenuesCmd::Delete { id, yes } => {
            let stored = found(db.get_venue(id)?, "venue", id.as_i64())?;
            if !yes {
                print_record(&stored)?;
                let matches = db.venue_match_count(id)?;
                if matches > 0 {
                    println!("Cannot be deleted while it has {} matches associated.", matches);
                    return Ok(());
                }
                println!("{}", CONFIRM_HINT);
                return Ok(());
            }
            db.delete_venue(id)?;
            println!("✓ Venue '{}' deleted", stored.record.name);
        }
    }
    Ok(())
}

pub fn handle_lookup(db: &CricketDatabase, kind: LookupKind) -> Result<()> {
    let entries = match kind {
        LookupKind::Teams => db.lookup_teams()?,
        LookupKind::Players => db.lookup_players()?,
        LookupKind::Venues => db.lookup_venues()?,
        LookupKind::Series => db.lookup_series()?,
        LookupKind::Matches => db.lookup_matches()?,
        LookupKind::Innings => db.lookup_innings()?,
    };

    if entries.is_empty() {
        println!("Nothing to choose from yet.");
    }
    for entry in entries {
        println!("{:>6}  {}", entry.id, entry.label);
    }
    Ok(())
}
