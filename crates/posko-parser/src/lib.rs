pub mod errors;
pub mod header;
pub mod model;
mod loader;

pub use errors::ParserError;
pub use header::{dedupe_column_names, find_header_row, HEADER_MARKER};
pub use loader::{load_table, parse_sheet, read_raw_table};
pub use model::{LoadedTable, RawTable, SheetRow};

#[cfg(test)]
mod tests;
