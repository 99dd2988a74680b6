//! Move tabular data between CSV directories, Excel workbooks, and
//! decision-optimization scenarios.
//!
//! A directory of CSV files becomes one workbook with a sheet per table
//! plus an index sheet mapping full table names to their (possibly
//! abbreviated) sheet names. Excel caps sheet names at 31 characters;
//! table names have no such limit. The reverse direction rebuilds the
//! named tables from a workbook, and the scenario module pushes a table
//! mapping into an external optimization framework through a capability
//! trait.

pub mod excel;
pub mod scenario;
pub mod table;

pub use excel::{
    DEFAULT_TABLE_INDEX_SHEET, IndexEntry, MAX_SHEET_NAME_LEN, read_workbook_tables,
    read_workbook_tables_from_path, unique_abbreviated_name, write_csv_directory,
    write_csv_directory_to_path,
};
pub use scenario::{
    DEFAULT_CATEGORY, ScenarioContainer, ScenarioFramework, load_scenario_tables,
    replace_scenario,
};
pub use table::{CsvOptions, Table, Value, read_csv_table, read_csv_table_from};
