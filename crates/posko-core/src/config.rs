use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::compose::{LinkStyle, MessageOptions, TimelineOrder};
use crate::error::{PipelineError, Result};
use crate::schema::ColumnSchema;

pub const ENV_SHEET_ID: &str = "POSKO_SHEET_ID";
pub const ENV_SHEET_GID: &str = "POSKO_SHEET_GID";
pub const ENV_SOURCE: &str = "POSKO_SOURCE";

pub const DEFAULT_FOOTER: &str =
    "Mohon kabari bila bantuan sudah diterima atau ada kebutuhan baru. Terima kasih 🙏";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub columns: ColumnSchema,
    pub message: MessageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub sheet_id: Option<String>,
    pub gid: String,
    pub path: Option<PathBuf>,
    pub url: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            gid: "0".to_string(),
            path: None,
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl SourceConfig {
    /// Where to fetch the sheet from: an explicit path, then an explicit URL, then the
    /// CSV export of the configured Google Sheet.
    pub fn location(&self) -> Result<SourceLocation> {
        if let Some(path) = &self.path {
            return Ok(SourceLocation::File(path.clone()));
        }
        if let Some(url) = &self.url {
            return Ok(SourceLocation::Url(url.clone()));
        }
        match self.sheet_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(SourceLocation::Url(sheet_export_url(id, &self.gid))),
            _ => Err(PipelineError::Config(format!(
                "no data source configured; set [source] path/url/sheet_id or {ENV_SOURCE}/{ENV_SHEET_ID}"
            ))),
        }
    }

    /// Points the source at `value`, treating anything with an http(s) scheme as a URL.
    pub fn set_location(&mut self, value: &str) {
        if value.starts_with("http://") || value.starts_with("https://") {
            self.url = Some(value.to_string());
            self.path = None;
        } else {
            self.path = Some(PathBuf::from(value));
            self.url = None;
        }
    }
}

pub fn sheet_export_url(sheet_id: &str, gid: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv&gid={gid}")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub footer: String,
    pub link_style: LinkStyle,
    pub timeline: TimelineOrder,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            footer: DEFAULT_FOOTER.to_string(),
            link_style: LinkStyle::default(),
            timeline: TimelineOrder::default(),
        }
    }
}

impl MessageConfig {
    pub fn options(&self, include_footer: bool) -> MessageOptions {
        MessageOptions {
            include_footer,
            timeline: self.timeline,
            link_style: self.link_style,
            footer: self.footer.clone(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    /// Applies `POSKO_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(sheet_id) = present(ENV_SHEET_ID) {
            self.source.sheet_id = Some(sheet_id);
        }
        if let Some(gid) = present(ENV_SHEET_GID) {
            self.source.gid = gid;
        }
        if let Some(source) = present(ENV_SOURCE) {
            self.source.set_location(&source);
        }
    }
}
