//! CSV and Excel export of result tables.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use super::table::{Cell, Table};
use crate::Result;

/// Excel caps worksheet names at 31 characters.
const MAX_SHEET_NAME: usize = 31;

/// Render `table` as CSV: a header row then one record per row.
pub fn csv_string(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_records(&mut writer, table)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_records(&mut writer, table)?;
    writer.flush()?;
    info!(path = %path.display(), rows = table.len(), "wrote CSV export");
    Ok(())
}

fn write_records<W: std::io::Write>(writer: &mut csv::Writer<W>, table: &Table) -> Result<()> {
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    Ok(())
}

/// Write `table` to a single-sheet workbook named `sheet_name`.
pub fn write_xlsx(table: &Table, sheet_name: &str, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        let name: String = sheet_name.chars().take(MAX_SHEET_NAME).collect();
        sheet.set_name(name)?;
        write_rows(sheet, table)?;
    }
    workbook.save(path)?;
    info!(path = %path.display(), rows = table.len(), "wrote Excel export");
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col_idx, name) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, name)?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        let r = row_idx as u32 + 1;
        for (col_idx, cell) in row.iter().enumerate() {
            let c = col_idx as u16;
            match cell {
                Cell::Null => {}
                Cell::Integer(i) => {
                    worksheet.write_number(r, c, *i as f64)?;
                }
                Cell::Real(v) => {
                    worksheet.write_number(r, c, *v)?;
                }
                Cell::Text(t) => {
                    worksheet.write_string(r, c, t)?;
                }
            }
        }
    }
    Ok(())
}
