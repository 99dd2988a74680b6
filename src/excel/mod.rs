//! Excel workbook conversion
//!
//! Converts a directory of CSV tables into a workbook with one sheet per
//! table plus an optional index sheet, and reads workbooks back into named
//! tables.

pub mod naming;
pub mod reader;
pub mod writer;

pub use naming::{MAX_SHEET_NAME_LEN, unique_abbreviated_name};
pub use reader::{read_workbook_tables, read_workbook_tables_from_path};
pub use writer::{write_csv_directory, write_csv_directory_to_path};

use serde::{Deserialize, Serialize};

/// Default name of the index sheet mapping table names to sheet names.
pub const DEFAULT_TABLE_INDEX_SHEET: &str = "_table_index_";

/// Column headers of the index sheet (written and looked up by name).
pub(crate) mod index_cols {
    pub const TABLE_NAME: &str = "table_name";
    pub const SHEET_NAME: &str = "sheet_name";
}

/// Mapping from a table name to its (possibly abbreviated) sheet name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub table_name: String,
    pub sheet_name: String,
}
