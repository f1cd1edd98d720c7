//! Live matches page.

use tracing::debug;

use crate::{
    cli::OutputArgs,
    cricbuzz::{live, summarize, LiveEnvelope, LiveMatchSummary},
    Result,
};

use super::{common::export_table, CommandContext};

/// Fetch live matches and print them grouped by match type and series.
pub async fn handle_live_matches(
    ctx: &CommandContext,
    refresh: bool,
    output: &OutputArgs,
) -> Result<()> {
    let client = ctx.client()?;
    let body = client.live_matches(refresh).await?;
    let envelope: LiveEnvelope = serde_json::from_value(body)?;
    let matches = summarize(&envelope);
    debug!(count = matches.len(), "live matches parsed");

    if output.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else if matches.is_empty() {
        println!("No live matches currently.");
    } else {
        print_grouped(&matches);
    }

    export_table(&live::to_table(&matches), "Live matches", output)
}

fn print_grouped(matches: &[LiveMatchSummary]) {
    let mut current_type: Option<&str> = None;
    let mut current_series: Option<&str> = None;

    for m in matches {
        if current_type != Some(m.match_type.as_str()) {
            println!("\n=== {} ===", m.match_type);
            current_type = Some(m.match_type.as_str());
            current_series = None;
        }
        if current_series != Some(m.series_name.as_str()) {
            println!("\n{}", m.series_name);
            current_series = Some(m.series_name.as_str());
        }

        println!("  {} vs {}", m.team1, m.team2);
        println!("    {} ({})", m.description, m.format);
        println!("    Status: {}", m.status);
        println!("    Venue:  {}", m.venue());
        if let Some(score) = m.team1_score {
            println!("    {}: {}", m.team1, score);
        }
        if let Some(score) = m.team2_score {
            println!("    {}: {}", m.team2, score);
        }
    }
}
