//! Home page: what the dashboard does and how it is configured.

use crate::{
    core::{
        config::{API_KEY_ENV_VAR, DATABASE_URL_ENV_VAR},
        DatabaseLocation,
    },
    storage::ANALYTICS_QUERIES,
    Result,
};

use super::CommandContext;

const PAGES: &[(&str, &str)] = &[
    ("live", "Real-time scores of matches in progress, grouped by series"),
    ("player", "Search players, view profiles, batting, bowling and career records"),
    ("analytics", "Predefined SQL questions over the local database, with export"),
    ("admin", "Create, list, update and delete players, matches, scorecards, teams and venues"),
    ("db", "Initialise the schema, describe its tables, import seed data"),
];

/// Handle the home page
pub fn handle_home(ctx: &CommandContext) -> Result<()> {
    println!("Cricbuzz LiveStats: Real-Time Cricket Insights & SQL-Based Analytics");
    println!();
    println!("Live match data from the Cricbuzz API combined with a local SQL");
    println!("database of players, matches, teams, venues and scorecards.");
    println!();

    println!("Pages:");
    for (name, summary) in PAGES {
        println!("  {:<10} {}", name, summary);
    }
    println!();
    println!("{} analytical questions available (`analytics list`).", ANALYTICS_QUERIES.len());
    println!();

    println!("Configuration:");
    match &ctx.config.database {
        DatabaseLocation::File(path) => println!("  Database:  {}", path.display()),
        DatabaseLocation::InMemory => println!("  Database:  in-memory (nothing is kept)"),
    }
    if ctx.config.api_key.is_some() {
        println!("  API key:   set");
    } else {
        println!(
            "  API key:   not set; `live` and `player` need {}",
            API_KEY_ENV_VAR
        );
    }
    println!("  API base:  {}", ctx.config.base_url);
    match &ctx.config.cache_dir {
        Some(dir) => println!(
            "  Cache:     {} (live scores kept {}s)",
            dir.display(),
            ctx.config.live_cache_ttl.as_secs()
        ),
        None => println!("  Cache:     in-memory only"),
    }
    println!();

    println!("Getting started:");
    println!("  1. Put {} (and optionally {}) in .env", API_KEY_ENV_VAR, DATABASE_URL_ENV_VAR);
    println!("  2. cricbuzz-livestats db init");
    println!("  3. cricbuzz-livestats live");

    Ok(())
}
