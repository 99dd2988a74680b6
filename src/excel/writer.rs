//! Write a directory of CSV tables to a workbook

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use glob::glob;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::table::{CsvOptions, Table, Value, read_csv_table};

use super::naming::{MAX_SHEET_NAME_LEN, unique_abbreviated_name};
use super::{IndexEntry, index_cols};

/// Add every `*.csv` file in `directory` to the workbook, one sheet per
/// table.
///
/// Table names are the file stems; sheet names are abbreviated where
/// needed to fit Excel's 31-character limit. When at least one table was
/// written and `index_sheet` is `Some`, an index sheet mapping table names
/// to sheet names is appended last. The caller owns the workbook handle
/// and is responsible for saving it.
///
/// Enumeration is non-recursive, in the order the glob yields paths.
pub fn write_csv_directory(
    workbook: &mut Workbook,
    directory: &Path,
    index_sheet: Option<&str>,
    options: &CsvOptions,
) -> Result<Vec<IndexEntry>> {
    let pattern = directory.join("*.csv");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("Non-UTF-8 directory path: {}", directory.display()))?;

    let mut entries: Vec<IndexEntry> = Vec::new();
    let mut sheet_names: HashSet<String> = HashSet::new();

    for path in glob(pattern)? {
        let path = path?;
        let table = read_csv_table(&path, options)?;

        let sheet_name = unique_abbreviated_name(&table.name, MAX_SHEET_NAME_LEN, &sheet_names)?;
        sheet_names.insert(sheet_name.clone());

        write_table_sheet(workbook, &table, &sheet_name)?;
        log::debug!("Added sheet '{}' for table '{}'", sheet_name, table.name);

        entries.push(IndexEntry {
            table_name: table.name,
            sheet_name,
        });
    }

    // An index over zero tables carries no information.
    if !entries.is_empty() {
        if let Some(index_name) = index_sheet {
            write_index_sheet(workbook, index_name, &entries)?;
        }
    }

    log::info!(
        "Added {} table sheet(s) from {}",
        entries.len(),
        directory.display()
    );
    Ok(entries)
}

/// Convert a CSV directory straight to an xlsx file on disk.
pub fn write_csv_directory_to_path(
    directory: &Path,
    output: &Path,
    index_sheet: Option<&str>,
    options: &CsvOptions,
) -> Result<Vec<IndexEntry>> {
    let mut workbook = Workbook::new();
    let entries = write_csv_directory(&mut workbook, directory, index_sheet, options)?;
    workbook
        .save(output)
        .with_context(|| format!("Failed to save Excel file: {}", output.display()))?;
    Ok(entries)
}

/// Write one table as a sheet with a header row
fn write_table_sheet(workbook: &mut Workbook, table: &Table, sheet_name: &str) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, column) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, column)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col_idx, value) in row.iter().enumerate() {
            write_value(worksheet, row_num, col_idx as u16, value)?;
        }
    }

    Ok(())
}

fn write_value(ws: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => { /* Leave cell empty */ }
        Value::String(s) => {
            ws.write_string(row, col, s)?;
        }
        Value::Int(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        Value::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        Value::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        Value::DateTime(dt) => {
            ws.write_string(row, col, dt.to_rfc3339())?;
        }
    }
    Ok(())
}

fn write_index_sheet(
    workbook: &mut Workbook,
    index_name: &str,
    entries: &[IndexEntry],
) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(index_name)?;

    worksheet.write_string(0, 0, index_cols::TABLE_NAME)?;
    worksheet.write_string(0, 1, index_cols::SHEET_NAME)?;

    for (idx, entry) in entries.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &entry.table_name)?;
        worksheet.write_string(row, 1, &entry.sheet_name)?;
    }

    log::debug!("Wrote index sheet '{}' with {} entries", index_name, entries.len());
    Ok(())
}
