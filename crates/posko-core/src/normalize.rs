use posko_parser::SheetRow;
use tracing::debug;

/// Administrative names whose canonical spelling is not plain title case.
const REGION_EXCEPTIONS: &[(&str, &str)] = &[
    ("dki jakarta", "DKI Jakarta"),
    ("di yogyakarta", "DI Yogyakarta"),
];

const LAT_NAMES: &[&str] = &["lat", "latitude"];
const LON_NAMES: &[&str] = &["long", "longitude", "lng"];

/// Collapses whitespace and title-cases a province or regency name.
pub fn clean_region_name(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let lower = collapsed.to_lowercase();

    if let Some((_, canonical)) = REGION_EXCEPTIONS.iter().find(|(key, _)| *key == lower) {
        return (*canonical).to_string();
    }

    title_case(&collapsed)
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Which columns hold the coordinates of a location, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateColumns {
    Distinct { lat: usize, lon: usize },
    Combined(usize),
    Missing,
}

impl CoordinateColumns {
    /// Prefers separate latitude/longitude columns and falls back to a single
    /// "lat long" column.
    pub fn detect(columns: &[String]) -> Self {
        let named = |names: &[&str]| {
            columns
                .iter()
                .position(|column| names.contains(&column.trim().to_lowercase().as_str()))
        };

        let detected = match (named(LAT_NAMES), named(LON_NAMES)) {
            (Some(lat), Some(lon)) => CoordinateColumns::Distinct { lat, lon },
            _ => columns
                .iter()
                .position(|column| {
                    let lower = column.to_lowercase();
                    lower.contains("lat") && lower.contains("long")
                })
                .map(CoordinateColumns::Combined)
                .unwrap_or(CoordinateColumns::Missing),
        };

        debug!(strategy = ?detected, "detected coordinate columns");
        detected
    }

    pub fn extract(&self, row: &SheetRow) -> (Option<f64>, Option<f64>) {
        match *self {
            CoordinateColumns::Distinct { lat, lon } => (
                row.text(lat).and_then(parse_decimal),
                row.text(lon).and_then(parse_decimal),
            ),
            CoordinateColumns::Combined(idx) => row
                .text(idx)
                .map(split_coordinate_pair)
                .unwrap_or((None, None)),
            CoordinateColumns::Missing => (None, None),
        }
    }
}

/// Parses a decimal that may use a comma as the decimal separator.
pub fn parse_decimal(token: &str) -> Option<f64> {
    let normalized = token.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Reads `"lat, lon"`, `"lat lon"` or `"lat;lon"` into its two halves.
///
/// Semicolons and whitespace separate first, so comma decimals such as `"-6,2 106,8"`
/// survive. A bare comma separates only when nothing else does, and a comma-only cell
/// that does not split into exactly two parts is ambiguous and yields nothing.
pub fn split_coordinate_pair(text: &str) -> (Option<f64>, Option<f64>) {
    let mut tokens: Vec<&str> = text
        .split(|ch: char| ch.is_whitespace() || ch == ';')
        .map(|token| token.trim_matches(','))
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() == 1 {
        let single: &str = tokens[0];
        let parts: Vec<&str> = single.split(',').map(str::trim).collect();
        if parts.len() > 2 {
            return (None, None);
        }
        tokens = parts;
    }

    let lat = tokens.first().copied().and_then(parse_decimal);
    let lon = tokens.get(1).copied().and_then(parse_decimal);
    (lat, lon)
}
