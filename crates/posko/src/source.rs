use std::time::Duration;

use anyhow::{Context, Result};
use posko_core::config::SourceLocation;
use tracing::info;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads the sheet export from disk or over HTTP.
pub async fn fetch_sheet(location: &SourceLocation) -> Result<String> {
    match location {
        SourceLocation::File(path) => {
            info!(path = %path.display(), "reading sheet export");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read sheet export {}", path.display()))
        }
        SourceLocation::Url(url) => {
            info!(%url, "downloading sheet export");
            let client = reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .context("failed to build HTTP client")?;
            let response = client
                .get(url)
                .send()
                .await
                .with_context(|| format!("request to {url} failed"))?
                .error_for_status()
                .with_context(|| format!("sheet export {url} returned an error status"))?;
            response
                .text()
                .await
                .context("failed to read sheet export body")
        }
    }
}
