//! Read workbook sheets back into named tables

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use indexmap::IndexMap;

use crate::table::{Table, Value};

use super::index_cols;

/// Read every sheet of the workbook into a table, keyed by table name.
///
/// When `index_sheet` is `Some` and that sheet exists, it resolves sheet
/// names back to their full table names; sheets without an index entry
/// fall back to the sheet name itself. The index sheet is never returned
/// as a table. Insertion order follows workbook sheet order. Two sheets
/// resolving to the same table name silently overwrite, last one wins.
pub fn read_workbook_tables<RS>(
    workbook: &mut Xlsx<RS>,
    index_sheet: Option<&str>,
) -> Result<IndexMap<String, Table>>
where
    RS: Read + Seek,
{
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();

    // sheet_name -> table_name, from the index sheet when present
    let mut lookup: HashMap<String, String> = HashMap::new();
    if let Some(index_name) = index_sheet {
        if sheet_names.iter().any(|s| s == index_name) {
            let range = workbook
                .worksheet_range(index_name)
                .with_context(|| format!("Failed to read sheet: {}", index_name))?;
            lookup = parse_index_sheet(&range)
                .with_context(|| format!("Malformed index sheet: {}", index_name))?;
        }
    }

    let mut tables: IndexMap<String, Table> = IndexMap::new();
    for sheet_name in &sheet_names {
        if Some(sheet_name.as_str()) == index_sheet {
            continue;
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        let table_name = lookup
            .get(sheet_name)
            .cloned()
            .unwrap_or_else(|| sheet_name.clone());

        log::debug!("Read sheet '{}' as table '{}'", sheet_name, table_name);
        let table = table_from_range(&table_name, &range);
        tables.insert(table_name, table);
    }

    log::info!("Read {} table(s) from workbook", tables.len());
    Ok(tables)
}

/// Open an xlsx file and read its tables.
pub fn read_workbook_tables_from_path(
    path: &Path,
    index_sheet: Option<&str>,
) -> Result<IndexMap<String, Table>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;
    read_workbook_tables(&mut workbook, index_sheet)
}

/// Build the sheet_name -> table_name lookup from the index sheet.
///
/// Columns are located by header name, so column order does not matter.
/// Rows with an empty table or sheet name are skipped. Entries for sheets
/// that do not exist in the workbook are harmless, the lookup is only
/// consulted per existing sheet.
fn parse_index_sheet(range: &Range<Data>) -> Result<HashMap<String, String>> {
    let mut rows = range.rows();
    let header = match rows.next() {
        Some(header) => header,
        None => return Ok(HashMap::new()),
    };

    let mut table_col = None;
    let mut sheet_col = None;
    for (col, cell) in header.iter().enumerate() {
        if let Data::String(s) = cell {
            match s.as_str() {
                index_cols::TABLE_NAME => table_col = Some(col),
                index_cols::SHEET_NAME => sheet_col = Some(col),
                _ => {}
            }
        }
    }

    let (Some(table_col), Some(sheet_col)) = (table_col, sheet_col) else {
        bail!(
            "Missing '{}'/'{}' header columns",
            index_cols::TABLE_NAME,
            index_cols::SHEET_NAME
        );
    };

    let mut lookup = HashMap::new();
    for row in rows {
        let table_name = get_cell_string(row, table_col);
        let sheet_name = get_cell_string(row, sheet_col);
        if table_name.is_empty() || sheet_name.is_empty() {
            continue;
        }
        lookup.insert(sheet_name, table_name);
    }

    Ok(lookup)
}

/// Parse a sheet range into a table: first row as column headers, the
/// rest as data rows.
fn table_from_range(name: &str, range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| match cell {
                Data::String(s) => s.clone(),
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect(),
        None => Vec::new(),
    };

    let mut table = Table::new(name, columns);
    for row in rows {
        table.push_row(row.iter().map(cell_to_value).collect());
    }
    table
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        // String cells go through the shared inference so the result
        // matches what the CSV importer produced for the same text.
        Data::String(s) => Value::infer(s),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Value::Int(*f as i64)
            } else {
                Value::Float(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(dt.to_string()),
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

fn get_cell_string(row: &[Data], col: usize) -> String {
    row.get(col)
        .map(|cell| match cell {
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                if f.fract() == 0.0 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            _ => String::new(),
        })
        .unwrap_or_default()
}
