use serde::{Deserialize, Serialize};
use tracing::debug;

/// Header labels of the coordination sheet, one per typed record field.
///
/// The coordinator phone columns carry no reliable label of their own (the sheet repeats
/// `No WA`), so by default they are located by position: the column right after the central
/// coordinator name and the column right before the field coordinator name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub number: String,
    pub province: String,
    pub regency: String,
    pub post_description: String,
    pub urgent_needs: String,
    pub communal_kitchen: String,
    pub offered_support: String,
    pub map_link: String,
    pub documentation_link: String,
    pub central_coordinator: String,
    pub field_coordinator: String,
    pub central_phone: Option<String>,
    pub field_phone: Option<String>,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            number: "No".into(),
            province: "Provinsi".into(),
            regency: "Kabupaten".into(),
            post_description: "Posko & Penjelasan Jumlah Orang, Berdasarkan Jenis Kelamin dan Usia"
                .into(),
            urgent_needs: "List Kebutuhan Mendesak".into(),
            communal_kitchen: "Apakah Ada Dapur Umum?".into(),
            offered_support: "Dukungan yang bisa di offer ke sesama jaringan".into(),
            map_link: "Link Google Map".into(),
            documentation_link: "Link Foto / Sosmed / Google Drive".into(),
            central_coordinator: "Nama Relawan Koordinator Pusat - Posisi Standby".into(),
            field_coordinator: "Nama Relawan Koordinator Lapangan".into(),
            central_phone: None,
            field_phone: None,
        }
    }
}

/// Column positions resolved once per load; `None` means the sheet has no such column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub number: Option<usize>,
    pub province: Option<usize>,
    pub regency: Option<usize>,
    pub post_description: Option<usize>,
    pub urgent_needs: Option<usize>,
    pub communal_kitchen: Option<usize>,
    pub offered_support: Option<usize>,
    pub map_link: Option<usize>,
    pub documentation_link: Option<usize>,
    pub central_name: Option<usize>,
    pub central_phone: Option<usize>,
    pub field_name: Option<usize>,
    pub field_phone: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(schema: &ColumnSchema, columns: &[String]) -> Self {
        let find = |label: &str| {
            let label = label.trim();
            columns.iter().position(|column| column.trim() == label)
        };

        let central_name = find(&schema.central_coordinator);
        let field_name = find(&schema.field_coordinator);

        let central_phone = match &schema.central_phone {
            Some(label) => find(label),
            None => central_name
                .map(|idx| idx + 1)
                .filter(|idx| *idx < columns.len()),
        };
        let field_phone = match &schema.field_phone {
            Some(label) => find(label),
            None => field_name.and_then(|idx| idx.checked_sub(1)),
        };

        let map = Self {
            number: find(&schema.number),
            province: find(&schema.province),
            regency: find(&schema.regency),
            post_description: find(&schema.post_description),
            urgent_needs: find(&schema.urgent_needs),
            communal_kitchen: find(&schema.communal_kitchen),
            offered_support: find(&schema.offered_support),
            map_link: find(&schema.map_link),
            documentation_link: find(&schema.documentation_link),
            central_name,
            central_phone,
            field_name,
            field_phone,
        };

        debug!(
            central_phone = ?map.central_phone.map(|idx| &columns[idx]),
            field_phone = ?map.field_phone.map(|idx| &columns[idx]),
            "resolved sheet column map"
        );

        map
    }
}
