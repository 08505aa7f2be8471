use posko_parser::SheetRow;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{LocationRecord, UpdateEntry};

const LOCAL_TRUNK_PREFIX: &str = "0";
const COUNTRY_CODE: &str = "62";
const UPDATE_PREFIX: &str = "update";

/// Digits-only WhatsApp number with the Indonesian trunk `0` rewritten to `62`.
///
/// Other shapes (already `62…`, foreign prefixes) are passed through as digits only.
/// Returns `None` when the input is absent or contains no digits.
pub fn normalize_phone(raw: Option<&str>) -> Option<String> {
    let digits: String = raw?.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    match digits.strip_prefix(LOCAL_TRUNK_PREFIX) {
        Some(rest) => Some(format!("{COUNTRY_CODE}{rest}")),
        None => Some(digits),
    }
}

/// Order in which update columns are enumerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl TimelineOrder {
    /// Arranges oldest-first `items` in this order.
    pub fn arrange<I>(self, items: I) -> Vec<I::Item>
    where
        I: IntoIterator,
        I::IntoIter: DoubleEndedIterator,
    {
        let items = items.into_iter();
        match self {
            TimelineOrder::OldestFirst => items.collect(),
            TimelineOrder::NewestFirst => items.rev().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateColumn {
    pub name: String,
    /// Position of the column in the sheet.
    pub position: usize,
    /// Number taken from the last run of digits in the column name.
    pub index: u32,
}

/// The numbered `Update` columns of a sheet, discovered once and stored oldest-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateColumns {
    ascending: Vec<UpdateColumn>,
}

impl UpdateColumns {
    pub fn ascending(&self) -> impl DoubleEndedIterator<Item = &UpdateColumn> {
        self.ascending.iter()
    }

    pub fn descending(&self) -> impl DoubleEndedIterator<Item = &UpdateColumn> {
        self.ascending.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.ascending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ascending.is_empty()
    }
}

/// Finds columns whose name starts with `Update` (any case) and carries a number.
pub fn discover_update_columns<S: AsRef<str>>(names: &[S]) -> UpdateColumns {
    let mut ascending: Vec<UpdateColumn> = names
        .iter()
        .enumerate()
        .filter_map(|(position, name)| {
            let name = name.as_ref();
            let trimmed = name.trim();
            let is_update = trimmed
                .get(..UPDATE_PREFIX.len())
                .map(|head| head.eq_ignore_ascii_case(UPDATE_PREFIX))
                .unwrap_or(false);
            if !is_update {
                return None;
            }
            let index = last_digit_run(trimmed)?;
            if index == u32::MAX {
                debug!(column = name, "update column number saturated");
            }
            Some(UpdateColumn {
                name: name.to_string(),
                position,
                index,
            })
        })
        .collect();

    // stable: equal indices keep sheet order
    ascending.sort_by_key(|column| column.index);
    UpdateColumns { ascending }
}

fn last_digit_run(name: &str) -> Option<u32> {
    let digits: String = name
        .chars()
        .rev()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if digits.is_empty() {
        return None;
    }
    // digit-only, so parsing fails only on overflow
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// Filled update cells of `row`, oldest-first.
pub fn collect_updates(row: &SheetRow, columns: &UpdateColumns) -> Vec<UpdateEntry> {
    columns
        .ascending()
        .filter_map(|column| {
            row.text(column.position).map(|text| UpdateEntry {
                column: column.name.clone(),
                index: column.index,
                text: text.to_string(),
            })
        })
        .collect()
}

/// `"<column>: <value>"` of the highest-numbered filled update column, or empty text.
pub fn compute_last_update<'a, I>(row: &SheetRow, columns_desc: I) -> String
where
    I: IntoIterator<Item = &'a UpdateColumn>,
{
    columns_desc
        .into_iter()
        .find_map(|column| {
            row.text(column.position)
                .map(|text| format!("{}: {}", column.name, text))
        })
        .unwrap_or_default()
}

/// Highest index among filled update columns, zero when none are filled.
pub fn compute_update_level<'a, I>(row: &SheetRow, columns: I) -> u32
where
    I: IntoIterator<Item = &'a UpdateColumn>,
{
    columns
        .into_iter()
        .filter(|column| row.text(column.position).is_some())
        .map(|column| column.index)
        .max()
        .unwrap_or(0)
}

/// A location is actionable once it lists urgent needs, names its regency and has a
/// reachable field coordinator.
pub fn is_ready(record: &LocationRecord) -> bool {
    !record.urgent_needs.trim().is_empty()
        && !record.regency.trim().is_empty()
        && record.field_coordinator.phone.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Contact;

    fn row(cells: &[&str]) -> SheetRow {
        SheetRow::new(0, cells.iter().map(|cell| cell.to_string()).collect())
    }

    #[test]
    fn phone_local_prefix_becomes_country_code() {
        assert_eq!(
            normalize_phone(Some("0812-3456-7890")).as_deref(),
            Some("6281234567890")
        );
        assert_eq!(normalize_phone(Some("0")).as_deref(), Some("62"));
    }

    #[test]
    fn phone_other_shapes_pass_through_as_digits() {
        assert_eq!(
            normalize_phone(Some("+62 812 3456")).as_deref(),
            Some("628123456")
        );
        assert_eq!(normalize_phone(Some("(1) 555-0100")).as_deref(), Some("15550100"));
    }

    #[test]
    fn phone_without_digits_is_absent() {
        assert_eq!(normalize_phone(None), None);
        assert_eq!(normalize_phone(Some("")), None);
        assert_eq!(normalize_phone(Some("nan")), None);
        assert_eq!(normalize_phone(Some(" - ")), None);
    }

    #[test]
    fn phone_trunk_rewrite_preserves_digit_count() {
        for raw in ["01", "0812", "0 8 1 2 3", "081234567890123"] {
            let digits = raw.chars().filter(char::is_ascii_digit).count();
            let normalized = normalize_phone(Some(raw)).unwrap();
            assert!(normalized.starts_with("62"), "{raw} -> {normalized}");
            assert_eq!(normalized.len(), digits - 1 + 2, "{raw} -> {normalized}");
        }
    }

    #[test]
    fn update_columns_use_last_digit_run() {
        let names = [
            "No",
            "Update 2",
            " update 10 ",
            "Update (v2) 3",
            "Updated by",
            "Last Update 4",
            "UPDATE 1",
        ];
        let columns = discover_update_columns(&names);

        let ascending: Vec<(&str, u32)> = columns
            .ascending()
            .map(|column| (column.name.as_str(), column.index))
            .collect();
        assert_eq!(
            ascending,
            vec![
                ("UPDATE 1", 1),
                ("Update 2", 2),
                ("Update (v2) 3", 3),
                (" update 10 ", 10),
            ]
        );
    }

    #[test]
    fn descending_is_exact_reverse_of_ascending() {
        let names = ["Update 3", "Update 1", "Update 1", "Update 12", "Catatan"];
        let columns = discover_update_columns(&names);

        let asc: Vec<&UpdateColumn> = columns.ascending().collect();
        let mut desc: Vec<&UpdateColumn> = columns.descending().collect();
        desc.reverse();
        assert_eq!(asc, desc);
        assert_eq!(columns.len(), 4);
        assert_eq!(
            TimelineOrder::NewestFirst.arrange(columns.ascending())[0].name,
            "Update 12"
        );
        assert_eq!(TimelineOrder::OldestFirst.arrange(columns.ascending()), asc);
    }

    #[test]
    fn oversized_update_numbers_keep_their_column() {
        let columns = discover_update_columns(&["Update 1", "Update 99999999999", "Update 2"]);
        let names: Vec<&str> = columns.ascending().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Update 1", "Update 2", "Update 99999999999"]);
        assert_eq!(columns.descending().next().map(|c| c.index), Some(u32::MAX));
    }

    #[test]
    fn last_update_and_level_use_filled_columns() {
        let columns = discover_update_columns(&["No", "Update 1", "Update 2", "Update 3"]);
        let filled = row(&["1", "Banjir surut", "Butuh selimut", "  "]);

        assert_eq!(
            compute_last_update(&filled, columns.descending()),
            "Update 2: Butuh selimut"
        );
        assert_eq!(compute_update_level(&filled, columns.ascending()), 2);

        let empty = row(&["1", "", "", ""]);
        assert_eq!(compute_last_update(&empty, columns.descending()), "");
        assert_eq!(compute_update_level(&empty, columns.ascending()), 0);
    }

    #[test]
    fn level_ignores_gaps() {
        let columns = discover_update_columns(&["Update 1", "Update 2", "Update 3"]);
        let sparse = row(&["", "", "Air mulai surut"]);
        assert_eq!(compute_update_level(&sparse, columns.ascending()), 3);
        assert_eq!(collect_updates(&sparse, &columns).len(), 1);
    }

    #[test]
    fn readiness_needs_all_three_facts() {
        let mut record = LocationRecord {
            urgent_needs: "Beras".into(),
            regency: "Bandung".into(),
            field_coordinator: Contact {
                name: "Andi".into(),
                phone_raw: "0812".into(),
                phone: Some("62812".into()),
            },
            ..LocationRecord::default()
        };
        assert!(is_ready(&record));

        record.field_coordinator.phone = None;
        assert!(!is_ready(&record));

        record.field_coordinator.phone = Some("62812".into());
        record.urgent_needs = "   ".into();
        assert!(!is_ready(&record));
    }
}
