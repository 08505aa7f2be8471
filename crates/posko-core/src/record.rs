use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    /// Phone cell as typed in the sheet, used for display.
    pub phone_raw: String,
    /// Digits-only WhatsApp number, `None` when the cell holds no digits.
    pub phone: Option<String>,
}

/// A non-blank cell of one of the numbered `Update` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntry {
    pub column: String,
    pub index: u32,
    pub text: String,
}

impl UpdateEntry {
    pub fn label(&self) -> String {
        format!("{}: {}", self.column, self.text)
    }
}

/// One relief location after normalization and derivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub row_index: usize,
    pub number: String,
    pub province: String,
    pub regency: String,
    pub clean_province: String,
    pub clean_regency: String,
    pub post_description: String,
    pub urgent_needs: String,
    pub communal_kitchen: String,
    pub offered_support: String,
    pub map_link: String,
    pub documentation_link: String,
    pub field_coordinator: Contact,
    pub central_coordinator: Contact,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Filled update cells in ascending index order.
    pub updates: Vec<UpdateEntry>,
    pub last_update_text: String,
    pub update_level: u32,
    pub is_ready: bool,
}

impl LocationRecord {
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}
