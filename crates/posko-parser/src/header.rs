use std::collections::{HashMap, HashSet};

use crate::model::RawTable;

/// First-cell text that marks the header row of the coordination sheet.
pub const HEADER_MARKER: &str = "No";

/// Index of the first row whose first cell, trimmed, is exactly [`HEADER_MARKER`].
///
/// Rows above it are pre-header noise (titles, instructions, example rows).
pub fn find_header_row(raw: &RawTable) -> Option<usize> {
    raw.iter().position(|row| {
        row.first()
            .map(|cell| cell.trim() == HEADER_MARKER)
            .unwrap_or(false)
    })
}

/// Makes every column label unique by appending ` (n)` to repeats.
///
/// The counter runs per distinct label, so `["No WA", "Nama", "No WA", "No WA"]`
/// becomes `["No WA", "Nama", "No WA (1)", "No WA (2)"]`. A counter that would
/// produce a name already in use is skipped, so the result never holds duplicates.
pub fn dedupe_column_names<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let mut emitted: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut counters: HashMap<&str, usize> = HashMap::new();
    let mut columns = Vec::with_capacity(headers.len());

    for header in headers {
        let label = header.as_ref();
        let mut name = label.to_string();
        if emitted.contains(&name) {
            let count = counters.entry(label).or_insert(0);
            loop {
                *count += 1;
                name = format!("{label} ({count})");
                if !emitted.contains(&name) {
                    break;
                }
            }
        }
        emitted.insert(name.clone());
        columns.push(name);
    }

    columns
}
