use std::fs;
use std::path::PathBuf;

use crate::errors::ParserError;
use crate::model::RawTable;
use crate::{dedupe_column_names, find_header_row, load_table, parse_sheet, read_raw_table};

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn raw(rows: &[&[&str]]) -> RawTable {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[test]
fn dedupe_appends_counter_to_repeated_labels() {
    let columns = dedupe_column_names(&["No", "Name", "Phone", "Phone"]);
    assert_eq!(columns, vec!["No", "Name", "Phone", "Phone (1)"]);
}

#[test]
fn dedupe_counts_each_label_independently() {
    let columns = dedupe_column_names(&["A", "B", "A", "B", "A"]);
    assert_eq!(columns, vec!["A", "B", "A (1)", "B (1)", "A (2)"]);
}

#[test]
fn dedupe_skips_suffixes_that_collide_with_real_labels() {
    let columns = dedupe_column_names(&["Phone", "Phone", "Phone (1)"]);
    assert_eq!(columns, vec!["Phone", "Phone (1)", "Phone (1) (1)"]);

    let columns = dedupe_column_names(&["Phone (1)", "Phone", "Phone"]);
    assert_eq!(columns, vec!["Phone (1)", "Phone", "Phone (2)"]);

    let unique: std::collections::HashSet<&String> = columns.iter().collect();
    assert_eq!(unique.len(), columns.len());
}

#[test]
fn header_discovery_skips_pre_header_noise() {
    let table = raw(&[
        &["Contoh", "x", "y"],
        &["No", "Province", "Regency"],
        &["1", "Jawa Barat", "Bandung"],
    ]);

    assert_eq!(find_header_row(&table), Some(1));

    let loaded = load_table(&table).expect("load failed");
    assert_eq!(loaded.header_row, 1);
    assert_eq!(loaded.columns, vec!["No", "Province", "Regency"]);
    assert_eq!(loaded.rows.len(), 1);
    assert_eq!(loaded.rows[0].row_index, 2);
}

#[test]
fn header_marker_is_trimmed_but_case_sensitive() {
    let table = raw(&[&["no", "a"], &["  No ", "a"], &["No", "b"]]);
    assert_eq!(find_header_row(&table), Some(1));
}

#[test]
fn missing_header_is_fatal() {
    let table = raw(&[&["Nomor", "Provinsi"], &["1", "Aceh"]]);
    match load_table(&table) {
        Err(ParserError::HeaderNotFound { scanned_rows, .. }) => assert_eq!(scanned_rows, 2),
        other => panic!("expected HeaderNotFound, got {other:?}"),
    }
}

#[test]
fn drops_blank_and_example_rows() {
    let table = raw(&[
        &["No", "Provinsi"],
        &[" 0 ", "Contoh"],
        &["", "  "],
        &["1", "Aceh"],
        &[],
        &["2", ""],
    ]);

    let loaded = load_table(&table).expect("load failed");
    let indices: Vec<usize> = loaded.rows.iter().map(|row| row.row_index).collect();
    assert_eq!(indices, vec![3, 5]);
    assert_eq!(loaded.rows[1].cells, vec!["2".to_string(), String::new()]);
}

#[test]
fn short_rows_are_padded_to_header_width() {
    let table = raw(&[&["No", "Provinsi", "Kabupaten"], &["1"]]);
    let loaded = load_table(&table).expect("load failed");
    assert_eq!(loaded.rows[0].cells.len(), 3);
    assert_eq!(loaded.rows[0].text(2), None);
}

#[test]
fn empty_source_is_rejected() {
    assert!(matches!(read_raw_table(""), Err(ParserError::EmptySource)));
}

#[test]
fn parses_relief_sheet_export() {
    let content = fixture("relief_sheet.csv");
    let loaded = parse_sheet(&content).expect("sheet parse failed");

    assert_eq!(loaded.header_row, 2);
    assert_eq!(loaded.columns.len(), 17);
    assert_eq!(loaded.columns[2], "No WA");
    assert_eq!(loaded.columns[3], "No WA (1)");
    assert_eq!(
        loaded.columns[7],
        "Posko & Penjelasan Jumlah Orang, Berdasarkan Jenis Kelamin dan Usia"
    );

    let indices: Vec<usize> = loaded.rows.iter().map(|row| row.row_index).collect();
    assert_eq!(indices, vec![4, 6, 7]);

    let first = loaded.row(4).expect("row 4 missing");
    assert_eq!(loaded.value(first, "Kabupaten"), Some("kab. bandung"));
    assert_eq!(loaded.value(first, "Lat Long"), Some("-6.91, 107.61"));
    assert!(loaded.row(3).is_none(), "example row must be dropped");
}

#[test]
fn strips_byte_order_mark() {
    let content = "\u{feff}No,Provinsi\n1,Aceh\n";
    let loaded = parse_sheet(content).expect("parse failed");
    assert_eq!(loaded.columns, vec!["No", "Provinsi"]);
}

#[test]
fn loading_is_idempotent() {
    let content = fixture("relief_sheet.csv");
    let first = parse_sheet(&content).expect("first parse failed");
    let second = parse_sheet(&content).expect("second parse failed");

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
