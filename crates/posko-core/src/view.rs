//! Dashboard-side queries over a loaded dataset: filtering, ordering, metrics and the
//! detail lookup by `row_index`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::LocationRecord;

const LABEL_POST_CHARS: usize = 60;

/// Empty sets place no constraint on their field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub provinces: BTreeSet<String>,
    pub regencies: BTreeSet<String>,
    pub coordinators: BTreeSet<String>,
    pub ready_only: bool,
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &LocationRecord) -> bool {
        if !self.provinces.is_empty() && !self.provinces.contains(&record.clean_province) {
            return false;
        }
        if !self.regencies.is_empty() && !self.regencies.contains(&record.clean_regency) {
            return false;
        }
        if !self.coordinators.is_empty()
            && !self.coordinators.contains(&record.field_coordinator.name)
        {
            return false;
        }
        if self.ready_only && !record.is_ready {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => matches_search(record, needle),
            _ => true,
        }
    }

    pub fn apply<'a>(&self, records: &'a [LocationRecord]) -> Vec<&'a LocationRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

fn matches_search(record: &LocationRecord, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [
        &record.post_description,
        &record.urgent_needs,
        &record.field_coordinator.name,
        &record.central_coordinator.name,
        &record.last_update_text,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// Most recently entered rows first.
    #[default]
    LatestEntry,
    /// Most advanced update first, newer rows breaking ties.
    UpdateLevel,
    /// Sheet order.
    EntryOrder,
}

pub fn sort_records(records: &mut [&LocationRecord], policy: SortPolicy) {
    match policy {
        SortPolicy::LatestEntry => records.sort_by(|a, b| b.row_index.cmp(&a.row_index)),
        SortPolicy::UpdateLevel => records.sort_by(|a, b| {
            b.update_level
                .cmp(&a.update_level)
                .then_with(|| b.row_index.cmp(&a.row_index))
        }),
        SortPolicy::EntryOrder => records.sort_by_key(|record| record.row_index),
    }
}

/// Filters then orders, the full pass behind each dashboard refresh.
pub fn select<'a>(
    records: &'a [LocationRecord],
    filter: &RecordFilter,
    policy: SortPolicy,
) -> Vec<&'a LocationRecord> {
    let mut selected = filter.apply(records);
    sort_records(&mut selected, policy);
    selected
}

/// Choices offered by the filter widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub provinces: Vec<String>,
    pub regencies: Vec<String>,
    pub coordinators: Vec<String>,
}

pub fn filter_options(records: &[LocationRecord]) -> FilterOptions {
    fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
        values
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    FilterOptions {
        provinces: distinct(records.iter().map(|record| &record.clean_province)),
        regencies: distinct(records.iter().map(|record| &record.clean_regency)),
        coordinators: distinct(records.iter().map(|record| &record.field_coordinator.name)),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub ready: usize,
    pub filtered: usize,
    pub mapped: usize,
}

impl Summary {
    pub fn compute(records: &[LocationRecord], filtered: &[&LocationRecord]) -> Self {
        Self {
            total: records.len(),
            ready: records.iter().filter(|record| record.is_ready).count(),
            filtered: filtered.len(),
            mapped: filtered
                .iter()
                .filter(|record| record.has_coordinates())
                .count(),
        }
    }
}

/// Resolves an externally supplied identifier to a record. Anything that is not a known
/// `row_index` yields `None`.
pub fn find_by_row_index<'a>(
    records: &'a [LocationRecord],
    id: &str,
) -> Option<&'a LocationRecord> {
    let row_index: usize = id.trim().parse().ok()?;
    records.iter().find(|record| record.row_index == row_index)
}

/// One-line label for pickers: `<No> – <province> / <regency> – <post>`.
pub fn option_label(record: &LocationRecord) -> String {
    let number = if record.number.is_empty() {
        record.row_index.to_string()
    } else {
        record.number.clone()
    };
    let mut post: String = record
        .post_description
        .chars()
        .take(LABEL_POST_CHARS)
        .collect();
    if record.post_description.chars().count() > LABEL_POST_CHARS {
        post.push('…');
    }
    format!(
        "{} – {} / {} – {}",
        number, record.clean_province, record.clean_regency, post
    )
}
