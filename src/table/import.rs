//! CSV import into tables

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use super::{Table, Value};

/// Options passed through to the CSV parser
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Treat the first record as the header row
    pub has_header: bool,
    /// Accept records with varying field counts
    pub flexible: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            has_header: true,
            flexible: true,
        }
    }
}

/// Read a delimited text file into a table named after the file stem.
pub fn read_csv_table(path: &Path, options: &CsvOptions) -> Result<Table> {
    let table_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    read_csv_table_from(BufReader::new(file), &table_name, options)
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))
}

/// Read delimited text from any reader into a table with the given name.
///
/// Headerless input gets synthesized column names `Column1`, `Column2`, …
/// A header shorter than the widest record is padded the same way.
pub fn read_csv_table_from<R: Read>(reader: R, name: &str, options: &CsvOptions) -> Result<Table> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        // Headers handled manually so headerless files get synthesized names.
        .has_headers(false)
        .flexible(options.flexible)
        .from_reader(reader);

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for record in csv_reader.records() {
        records.push(record?);
    }

    let mut columns: Vec<String> = Vec::new();
    let data_start = if options.has_header && !records.is_empty() {
        columns = records[0].iter().map(|s| s.to_string()).collect();
        1
    } else {
        0
    };

    let width = records
        .iter()
        .map(|r| r.len())
        .max()
        .unwrap_or(0)
        .max(columns.len());
    if columns.len() < width {
        columns.extend((columns.len()..width).map(|i| format!("Column{}", i + 1)));
    }

    let mut table = Table::new(name, columns);
    for record in records.iter().skip(data_start) {
        table.push_row(record.iter().map(Value::infer).collect());
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_with_header() {
        let input = "name,capacity,active\nGent,120,true\nLuik,80.5,false\n";
        let table =
            read_csv_table_from(Cursor::new(input), "plants", &CsvOptions::default()).unwrap();

        assert_eq!(table.name, "plants");
        assert_eq!(table.columns, vec!["name", "capacity", "active"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows[0],
            vec![
                Value::String("Gent".into()),
                Value::Int(120),
                Value::Bool(true)
            ]
        );
        assert_eq!(table.rows[1][1], Value::Float(80.5));
    }

    #[test]
    fn test_read_without_header() {
        let options = CsvOptions {
            has_header: false,
            ..CsvOptions::default()
        };
        let table = read_csv_table_from(Cursor::new("1,2\n3,4\n"), "raw", &options).unwrap();

        assert_eq!(table.columns, vec!["Column1", "Column2"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0], vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_read_with_semicolon_delimiter() {
        let options = CsvOptions {
            delimiter: b';',
            ..CsvOptions::default()
        };
        let table = read_csv_table_from(Cursor::new("a;b\n1;x\n"), "t", &options).unwrap();

        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(
            table.rows[0],
            vec![Value::Int(1), Value::String("x".into())]
        );
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let input = "a,b,c\n1,2\n4,5,6,7\n";
        let table = read_csv_table_from(Cursor::new(input), "t", &CsvOptions::default()).unwrap();

        // Widest record wins, short rows pad with nulls.
        assert_eq!(table.columns, vec!["a", "b", "c", "Column4"]);
        assert_eq!(
            table.rows[0],
            vec![Value::Int(1), Value::Int(2), Value::Null, Value::Null]
        );
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn test_empty_input() {
        let table = read_csv_table_from(Cursor::new(""), "t", &CsvOptions::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }
}
