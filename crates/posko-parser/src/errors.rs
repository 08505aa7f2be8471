use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    /// No row starting with the `No` marker was found; the sheet layout is not usable.
    #[error("header row not found: no row among the first {scanned_rows} starts with '{marker}'")]
    HeaderNotFound {
        marker: &'static str,
        scanned_rows: usize,
    },

    #[error("CSV error at record {record_index}: {source}")]
    Csv {
        record_index: usize,
        #[source]
        source: csv::Error,
    },

    #[error("source did not contain any rows")]
    EmptySource,
}
