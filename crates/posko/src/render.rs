use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use posko_core::view::{FilterOptions, Summary};
use posko_core::LocationRecord;

const CELL_CHARS: usize = 48;

fn clip(text: &str) -> String {
    let mut clipped: String = text.chars().take(CELL_CHARS).collect();
    if text.chars().count() > CELL_CHARS {
        clipped.push('…');
    }
    clipped
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "ya"
    } else {
        "-"
    }
}

pub fn records_table(records: &[&LocationRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Row",
            "No",
            "Provinsi",
            "Kabupaten",
            "Posko",
            "Kebutuhan Mendesak",
            "PIC Lapangan",
            "Update Terakhir",
            "Siap Dibantu",
        ]);

    for record in records {
        table.add_row(vec![
            record.row_index.to_string(),
            record.number.clone(),
            record.clean_province.clone(),
            record.clean_regency.clone(),
            clip(&record.post_description),
            clip(&record.urgent_needs),
            record.field_coordinator.name.clone(),
            clip(&record.last_update_text),
            yes_no(record.is_ready).to_string(),
        ]);
    }
    table
}

pub fn summary_table(summary: &Summary, options: &FilterOptions) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metrik", "Nilai"]);
    table.add_row(vec!["Total Lokasi".to_string(), summary.total.to_string()]);
    table.add_row(vec![
        "Lokasi Siap Dibantu".to_string(),
        summary.ready.to_string(),
    ]);
    table.add_row(vec![
        "Lokasi Terfilter".to_string(),
        summary.filtered.to_string(),
    ]);
    table.add_row(vec![
        "Lokasi dengan Koordinat".to_string(),
        summary.mapped.to_string(),
    ]);
    table.add_row(vec!["Provinsi".to_string(), options.provinces.join(", ")]);
    table.add_row(vec!["Kabupaten".to_string(), options.regencies.join(", ")]);
    table.add_row(vec![
        "PIC Lapangan".to_string(),
        options.coordinators.join(", "),
    ]);
    table
}

pub fn detail_table(record: &LocationRecord) -> Table {
    let coordinates = match (record.lat, record.lon) {
        (Some(lat), Some(lon)) => format!("{lat}, {lon}"),
        _ => "-".to_string(),
    };
    let rows = [
        ("Provinsi", record.clean_province.clone()),
        ("Kabupaten", record.clean_regency.clone()),
        ("Posko / Lokasi", record.post_description.clone()),
        ("Kebutuhan Mendesak", record.urgent_needs.clone()),
        ("PIC Lapangan", record.field_coordinator.name.clone()),
        ("No WA Lapangan", record.field_coordinator.phone_raw.clone()),
        ("PIC Pusat", record.central_coordinator.name.clone()),
        ("No WA Pusat", record.central_coordinator.phone_raw.clone()),
        ("Dapur Umum", record.communal_kitchen.clone()),
        ("Dukungan", record.offered_support.clone()),
        ("Koordinat", coordinates),
        ("Link GMaps", record.map_link.clone()),
        ("Link Dokumentasi", record.documentation_link.clone()),
        ("Update Terakhir", record.last_update_text.clone()),
        ("Level Update", record.update_level.to_string()),
        ("Siap Dibantu", yes_no(record.is_ready).to_string()),
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for (label, value) in rows {
        if !value.is_empty() {
            table.add_row(vec![label.to_string(), value]);
        }
    }
    table
}
