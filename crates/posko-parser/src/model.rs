use serde::{Deserialize, Serialize};

/// Row-major text cells exactly as the sheet export delivered them. No header is assumed.
pub type RawTable = Vec<Vec<String>>;

/// A data row below the header, keyed by its position in the raw source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub row_index: usize,
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn new(row_index: usize, cells: Vec<String>) -> Self {
        Self { row_index, cells }
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Trimmed cell content, `None` when the cell is missing or blank.
    pub fn text(&self, column: usize) -> Option<&str> {
        self.cell(column)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedTable {
    pub header_row: usize,
    pub columns: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl LoadedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn value<'a>(&self, row: &'a SheetRow, name: &str) -> Option<&'a str> {
        self.column_index(name).and_then(|idx| row.cell(idx))
    }

    pub fn row(&self, row_index: usize) -> Option<&SheetRow> {
        self.rows.iter().find(|row| row.row_index == row_index)
    }
}
