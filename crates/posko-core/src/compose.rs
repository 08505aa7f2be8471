//! WhatsApp message bodies for one or several locations, and the deep link that opens
//! WhatsApp with the body prefilled.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_FOOTER;
use crate::record::{Contact, LocationRecord};

pub use crate::derive::TimelineOrder;

pub const BLOCK_SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStyle {
    /// `whatsapp://send?…`, handled by the installed app.
    #[default]
    AppScheme,
    /// `https://wa.me/…`, works from any browser.
    WebLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOptions {
    pub include_footer: bool,
    pub timeline: TimelineOrder,
    pub link_style: LinkStyle,
    pub footer: String,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            include_footer: false,
            timeline: TimelineOrder::default(),
            link_style: LinkStyle::default(),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedMessage {
    pub body: String,
    /// Normalized number the link is addressed to, if any.
    pub recipient: Option<String>,
    pub link: String,
}

pub fn compose_single(record: &LocationRecord, options: &MessageOptions) -> ComposedMessage {
    let mut body = record_block(record, options.timeline);
    append_footer(&mut body, options);
    finish(body, record.field_coordinator.phone.clone(), options.link_style)
}

/// Numbered blocks separated by [`BLOCK_SEPARATOR`]; the footer, if requested, closes the
/// whole message once.
pub fn compose_many(records: &[&LocationRecord], options: &MessageOptions) -> ComposedMessage {
    let blocks: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            format!(
                "*Lokasi {}*\n{}",
                idx + 1,
                record_block(record, options.timeline)
            )
        })
        .collect();

    let mut body = blocks.join(&format!("\n\n{BLOCK_SEPARATOR}\n\n"));
    append_footer(&mut body, options);
    finish(body, shared_recipient(records), options.link_style)
}

/// The field coordinator number, but only when every record points to the same one.
fn shared_recipient(records: &[&LocationRecord]) -> Option<String> {
    let first = records.first()?.field_coordinator.phone.as_ref()?;
    records
        .iter()
        .all(|record| record.field_coordinator.phone.as_ref() == Some(first))
        .then(|| first.clone())
}

fn finish(body: String, recipient: Option<String>, style: LinkStyle) -> ComposedMessage {
    let link = build_deep_link(recipient.as_deref(), &body, style);
    ComposedMessage {
        body,
        recipient,
        link,
    }
}

fn append_footer(body: &mut String, options: &MessageOptions) {
    let footer = options.footer.trim();
    if !options.include_footer || footer.is_empty() {
        return;
    }
    if !body.is_empty() {
        body.push_str("\n\n");
    }
    body.push_str(footer);
}

/// Link that opens WhatsApp with `body` prefilled, addressed to `phone` when given and
/// to the contact picker otherwise.
pub fn build_deep_link(phone: Option<&str>, body: &str, style: LinkStyle) -> String {
    let text = urlencoding::encode(body);
    match (style, phone) {
        (LinkStyle::AppScheme, Some(phone)) => {
            format!("whatsapp://send?phone={phone}&text={text}")
        }
        (LinkStyle::AppScheme, None) => format!("whatsapp://send?text={text}"),
        (LinkStyle::WebLink, Some(phone)) => format!("https://wa.me/{phone}?text={text}"),
        (LinkStyle::WebLink, None) => format!("https://wa.me/?text={text}"),
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn contact_line(role: &str, contact: &Contact) -> String {
    let mut line = format!("*{role}*: {}", or_dash(&contact.name));
    if !contact.phone_raw.is_empty() {
        line.push_str(&format!(" ({})", contact.phone_raw));
    }
    line
}

fn record_block(record: &LocationRecord, timeline: TimelineOrder) -> String {
    let mut parts: Vec<String> = vec![
        format!(
            "*[Koordinasi Bantuan – {} / {}]*",
            or_dash(&record.clean_province),
            or_dash(&record.clean_regency)
        ),
        String::new(),
        "*Lokasi / Posko*".to_string(),
        or_dash(&record.post_description).to_string(),
        String::new(),
        format!("*Provinsi*: {}", or_dash(&record.clean_province)),
        format!("*Kab/Kota*: {}", or_dash(&record.clean_regency)),
        String::new(),
        contact_line("PIC Lapangan", &record.field_coordinator),
        contact_line("PIC Pusat", &record.central_coordinator),
        String::new(),
        "*List Kebutuhan Mendesak*:".to_string(),
        or_dash(&record.urgent_needs).to_string(),
    ];

    if !record.communal_kitchen.is_empty() {
        parts.push(String::new());
        parts.push(format!("*Dapur Umum*: {}", record.communal_kitchen));
    }
    if !record.offered_support.is_empty() {
        parts.push(String::new());
        parts.push(format!("*Dukungan dari jaringan*: {}", record.offered_support));
    }

    if !record.updates.is_empty() {
        parts.push(String::new());
        parts.push("*Timeline Update*:".to_string());
        parts.extend(
            timeline
                .arrange(&record.updates)
                .into_iter()
                .map(|entry| format!("- {}", entry.label())),
        );
    }

    if !record.map_link.is_empty() {
        parts.push(String::new());
        parts.push(format!("📍 Map: {}", record.map_link));
    }
    if !record.documentation_link.is_empty() {
        parts.push(String::new());
        parts.push(format!("🖼 Dokumentasi: {}", record.documentation_link));
    }

    parts.join("\n").trim().to_string()
}
