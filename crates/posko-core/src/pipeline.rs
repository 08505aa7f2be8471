use posko_parser::{parse_sheet, LoadedTable, SheetRow};
use serde::Serialize;
use tracing::info;

use crate::derive::{
    collect_updates, compute_last_update, compute_update_level, discover_update_columns,
    is_ready, normalize_phone, UpdateColumns,
};
use crate::error::Result;
use crate::normalize::{clean_region_name, CoordinateColumns};
use crate::record::{Contact, LocationRecord};
use crate::schema::{ColumnMap, ColumnSchema};

/// Normalized records of one sheet load, plus the column facts they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub update_columns: UpdateColumns,
    pub records: Vec<LocationRecord>,
}

impl Dataset {
    pub fn record(&self, row_index: usize) -> Option<&LocationRecord> {
        self.records
            .iter()
            .find(|record| record.row_index == row_index)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parses a CSV export and runs it through normalization and derivation.
pub fn process_sheet(content: &str, schema: &ColumnSchema) -> Result<Dataset> {
    let table = parse_sheet(content)?;
    Ok(build_dataset(&table, schema))
}

/// Maps every loaded row onto a [`LocationRecord`]. Never fails: cells that cannot be
/// interpreted leave the derived field empty for that record only.
pub fn build_dataset(table: &LoadedTable, schema: &ColumnSchema) -> Dataset {
    let map = ColumnMap::resolve(schema, &table.columns);
    let coordinates = CoordinateColumns::detect(&table.columns);
    let update_columns = discover_update_columns(table.columns.as_slice());

    let records: Vec<LocationRecord> = table
        .rows
        .iter()
        .map(|row| build_record(row, &map, coordinates, &update_columns))
        .collect();

    info!(
        records = records.len(),
        ready = records.iter().filter(|record| record.is_ready).count(),
        update_columns = update_columns.len(),
        "built location dataset"
    );

    Dataset {
        columns: table.columns.clone(),
        update_columns,
        records,
    }
}

fn build_record(
    row: &SheetRow,
    map: &ColumnMap,
    coordinates: CoordinateColumns,
    update_columns: &UpdateColumns,
) -> LocationRecord {
    let text = |column: Option<usize>| -> String {
        column
            .and_then(|idx| row.text(idx))
            .unwrap_or_default()
            .to_string()
    };
    let contact = |name: Option<usize>, phone: Option<usize>| {
        let phone_raw = text(phone);
        Contact {
            name: text(name),
            phone: normalize_phone(Some(&phone_raw)),
            phone_raw,
        }
    };

    let province = text(map.province);
    let regency = text(map.regency);
    let (lat, lon) = coordinates.extract(row);

    let mut record = LocationRecord {
        row_index: row.row_index,
        number: text(map.number),
        clean_province: clean_region_name(&province),
        clean_regency: clean_region_name(&regency),
        province,
        regency,
        post_description: text(map.post_description),
        urgent_needs: text(map.urgent_needs),
        communal_kitchen: text(map.communal_kitchen),
        offered_support: text(map.offered_support),
        map_link: text(map.map_link),
        documentation_link: text(map.documentation_link),
        field_coordinator: contact(map.field_name, map.field_phone),
        central_coordinator: contact(map.central_name, map.central_phone),
        lat,
        lon,
        updates: collect_updates(row, update_columns),
        last_update_text: compute_last_update(row, update_columns.descending()),
        update_level: compute_update_level(row, update_columns.ascending()),
        is_ready: false,
    };
    record.is_ready = is_ready(&record);
    record
}
