//! Common utilities and helper functions shared across commands.
//!
//! Every page gets a [`CommandContext`]; the database connection and the API
//! client are built from it only when the page asks for them.

use std::path::Path;

use crate::{
    cli::OutputArgs,
    core::{export, Config, Table},
    cricbuzz::CricbuzzClient,
    storage::CricketDatabase,
    Result,
};

/// Resources a page handler may need, constructed once per invocation.
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Open (and if needed initialise) the configured database.
    pub fn database(&self) -> Result<CricketDatabase> {
        CricketDatabase::open(&self.config.database)
    }

    /// Build the API client. Fails when no API key is configured.
    pub fn client(&self) -> Result<CricbuzzClient> {
        CricbuzzClient::new(&self.config)
    }
}

/// Print `table` per the output flags, then write any requested exports.
///
/// `sheet` names the Excel worksheet.
pub fn emit_table(table: &Table, sheet: &str, output: &OutputArgs) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&table.to_records())?);
    } else if table.is_empty() {
        println!("No rows found.");
    } else {
        print!("{}", table.render());
    }
    export_table(table, sheet, output)
}

/// Write CSV and Excel exports requested by `output`.
pub fn export_table(table: &Table, sheet: &str, output: &OutputArgs) -> Result<()> {
    if let Some(path) = &output.csv {
        export::write_csv(table, path)?;
        print_exported(table, path);
    }
    if let Some(path) = &output.xlsx {
        export::write_xlsx(table, sheet, path)?;
        print_exported(table, path);
    }
    Ok(())
}

fn print_exported(table: &Table, path: &Path) {
    println!("✓ Exported {} rows to {}", table.len(), path.display());
}

/// Print a stored record as indented JSON.
pub fn print_record<T: serde::Serialize>(record: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
