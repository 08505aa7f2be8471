use tracing::debug;

use crate::errors::ParserError;
use crate::header::{dedupe_column_names, find_header_row, HEADER_MARKER};
use crate::model::{LoadedTable, RawTable, SheetRow};

/// `No` value used by the sheet's example row, which is not a real location.
const EXAMPLE_ROW_NUMBER: &str = "0";

/// Decodes a CSV export into raw rows without assuming a header.
pub fn read_raw_table(content: &str) -> Result<RawTable, ParserError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut raw = Vec::new();
    for (record_index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| ParserError::Csv {
            record_index,
            source,
        })?;
        raw.push(record.iter().map(str::to_string).collect());
    }

    if raw.is_empty() {
        return Err(ParserError::EmptySource);
    }

    Ok(raw)
}

/// Locates the header row, deduplicates its labels and collects the data rows below it.
///
/// Fully blank rows and the example row (`No` = `0`) are dropped. Every kept row remembers
/// its position in `raw` as `row_index`.
pub fn load_table(raw: &RawTable) -> Result<LoadedTable, ParserError> {
    let header_row = find_header_row(raw).ok_or(ParserError::HeaderNotFound {
        marker: HEADER_MARKER,
        scanned_rows: raw.len(),
    })?;

    let columns = dedupe_column_names(raw[header_row].as_slice());
    let number_column = columns.iter().position(|column| column == HEADER_MARKER);
    let width = columns.len();

    let mut rows = Vec::new();
    let mut blank_rows = 0usize;
    let mut example_rows = 0usize;

    for (row_index, cells) in raw.iter().enumerate().skip(header_row + 1) {
        let mut cells: Vec<String> = cells.iter().take(width).cloned().collect();
        cells.resize(width, String::new());
        let row = SheetRow::new(row_index, cells);

        if row.is_blank() {
            blank_rows += 1;
            continue;
        }

        if let Some(idx) = number_column {
            if row.cell(idx).map(str::trim) == Some(EXAMPLE_ROW_NUMBER) {
                example_rows += 1;
                continue;
            }
        }

        rows.push(row);
    }

    debug!(
        header_row,
        columns = width,
        rows = rows.len(),
        blank_rows,
        example_rows,
        "loaded sheet table"
    );

    Ok(LoadedTable {
        header_row,
        columns,
        rows,
    })
}

pub fn parse_sheet(content: &str) -> Result<LoadedTable, ParserError> {
    let raw = read_raw_table(content)?;
    load_table(&raw)
}
