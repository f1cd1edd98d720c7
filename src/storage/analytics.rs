//! Execution of the predefined analytical questions

use super::{catalog::find_query, schema::CricketDatabase};
use crate::core::table::Table;
use crate::{CricError, Result};
use tracing::debug;

impl CricketDatabase {
    /// Run catalog question `id` (1-based) and return its result set.
    pub fn run_analytics(&self, id: usize) -> Result<Table> {
        let query = find_query(id).ok_or(CricError::UnknownQuery { id })?;
        debug!(id, question = query.question, "running analytics query");

        let table = self.query_table(query.sql, &[])?;
        debug!(id, rows = table.len(), "analytics query finished");
        Ok(table)
    }
}
