//! Database page: schema setup and description.

use std::path::Path;

use crate::{storage::TABLE_DESCRIPTIONS, Result};

use super::CommandContext;

/// Create any missing tables and report what is there.
pub fn handle_db_init(ctx: &CommandContext) -> Result<()> {
    let db = ctx.database()?;
    let tables = db.table_names()?;
    println!("✓ Database ready ({} tables)", tables.len());
    Ok(())
}

pub fn handle_db_tables(ctx: &CommandContext) -> Result<()> {
    let db = ctx.database()?;
    for name in db.table_names()? {
        let description = TABLE_DESCRIPTIONS
            .iter()
            .find(|(table, _)| *table == name)
            .map(|(_, d)| *d)
            .unwrap_or("");
        println!("{:<20} {}", name, description);
    }
    Ok(())
}

/// Execute every statement in a SQL file.
pub fn handle_db_import(ctx: &CommandContext, path: &Path) -> Result<()> {
    let sql = std::fs::read_to_string(path)?;
    let db = ctx.database()?;
    db.execute_script(&sql)?;
    println!("✓ Imported {}", path.display());
    Ok(())
}
