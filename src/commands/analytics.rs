//! Analytics page: the predefined SQL questions.

use tracing::info;

use crate::{
    cli::OutputArgs,
    storage::{find_query, ANALYTICS_QUERIES},
    CricError, Result,
};

use super::{common::emit_table, CommandContext};

pub fn handle_analytics_list() -> Result<()> {
    for query in ANALYTICS_QUERIES {
        println!("{:>2}. {}", query.id, query.question);
    }
    Ok(())
}

pub fn handle_analytics_show(id: usize) -> Result<()> {
    let query = find_query(id).ok_or(CricError::UnknownQuery { id })?;
    println!("Q{}: {}", query.id, query.question);
    println!();
    println!("{}", query.sql.trim());
    Ok(())
}

/// Run a question, print its rows and write any requested exports.
pub fn handle_analytics_run(ctx: &CommandContext, id: usize, output: &OutputArgs) -> Result<()> {
    let query = find_query(id).ok_or(CricError::UnknownQuery { id })?;
    let db = ctx.database()?;

    let table = db.run_analytics(id)?;
    info!(query = id, rows = table.len(), "analytics query executed");

    if !output.json {
        println!("Q{}: {}", query.id, query.question);
        println!("{} rows returned", table.len());
        println!();
    }
    emit_table(&table, &format!("Q{}", query.id), output)
}
