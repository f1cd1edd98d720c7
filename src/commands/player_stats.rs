//! Player stats page: search, profile and career tables from the API.

use serde_json::Value;

use crate::{
    cli::{types::StatKind, OutputArgs},
    cricbuzz::{types::value_text, CareerInfo, PlayerProfile, PlayerSearch, StatsTable},
    CricError, Result,
};

use super::{common::emit_table, CommandContext};

fn print_raw(body: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

/// Search players by name and list id, name and team of each hit.
pub async fn handle_player_search(
    ctx: &CommandContext,
    name: &str,
    raw: bool,
    as_json: bool,
) -> Result<()> {
    let body = ctx.client()?.search_players(name).await?;
    if raw {
        return print_raw(&body);
    }

    let search: PlayerSearch = serde_json::from_value(body)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&search.player)?);
        return Ok(());
    }
    if search.player.is_empty() {
        println!("No players found matching '{}'", name.trim());
        return Ok(());
    }

    println!("Found {} players:", search.player.len());
    for hit in &search.player {
        println!(
            "  {:>8}  {} ({})",
            hit.id.map(|id| id.to_string()).unwrap_or_default(),
            hit.name.as_deref().unwrap_or("Unknown"),
            hit.team_name.as_deref().unwrap_or("N/A"),
        );
    }
    Ok(())
}

/// Personal information, rankings, image and debut details.
pub async fn handle_player_profile(ctx: &CommandContext, id: u64, raw: bool) -> Result<()> {
    let client = ctx.client()?;
    let body = client.player_profile(id).await?;
    if raw {
        return print_raw(&body);
    }

    let profile: PlayerProfile = serde_json::from_value(body)?;
    if profile.name.is_none() {
        return Err(CricError::NoData);
    }

    let field = |label: &str, value: &Option<String>| {
        println!("{:<15} {}", label, value.as_deref().unwrap_or("N/A"));
    };
    println!("{}", profile.name.as_deref().unwrap_or_default());
    if let Some(nick) = &profile.nick_name {
        println!("\"{}\"", nick);
    }
    println!();
    field("Team:", &profile.intl_team);
    field("Date of birth:", &profile.dob);
    field("Birth place:", &profile.birth_place);
    field("Role:", &profile.role);
    field("Batting:", &profile.bat);
    field("Bowling:", &profile.bowl);
    field("Teams:", &profile.teams);
    println!("{:<15} {}", "Image:", profile.image_url());
    field("Profile:", &profile.web_url);

    if !profile.rankings.is_empty() {
        println!("\nICC rankings");
        for (discipline, ranks) in [
            ("Batting", &profile.rankings.bat),
            ("Bowling", &profile.rankings.bowl),
            ("All-rounder", &profile.rankings.all),
        ] {
            if ranks.is_empty() {
                continue;
            }
            let line = ranks
                .iter()
                .map(|(label, rank)| format!("{}: {}", label, value_text(rank)))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {:<12} {}", discipline, line);
        }
    }

    // Separate request; reported inline on failure.
    match client.career_info(id).await {
        Ok(body) => {
            let career: CareerInfo = serde_json::from_value(body)?;
            if !career.values.is_empty() {
                println!("\nCareer");
                print!("{}", career.to_table().render());
            }
        }
        Err(e) => println!("\nCareer information unavailable: {}", e),
    }
    Ok(())
}

/// Career batting or bowling table by format.
pub async fn handle_player_stats(
    ctx: &CommandContext,
    id: u64,
    kind: StatKind,
    raw: bool,
    output: &OutputArgs,
) -> Result<()> {
    let body = ctx.client()?.player_stats(id, kind).await?;
    if raw {
        return print_raw(&body);
    }

    let stats: StatsTable = serde_json::from_value(body)?;
    let table = stats.to_table();
    if table.columns.is_empty() {
        println!("No {} statistics available for player {}", kind, id);
        return Ok(());
    }
    emit_table(&table, &format!("{} {}", id, kind), output)
}

pub async fn handle_player_career(
    ctx: &CommandContext,
    id: u64,
    raw: bool,
    output: &OutputArgs,
) -> Result<()> {
    let body = ctx.client()?.career_info(id).await?;
    if raw {
        return print_raw(&body);
    }

    let career: CareerInfo = serde_json::from_value(body)?;
    emit_table(&career.to_table(), &format!("{} career", id), output)
}
