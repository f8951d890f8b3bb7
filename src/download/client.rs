use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::ui::Ui;

const LATEST_URL: &str = "https://developers.eveonline.com/static-data/tranquility/latest.jsonl";
const ZIP_URL_PREFIX: &str =
    "https://developers.eveonline.com/static-data/tranquility/eve-online-static-data-";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Deserialize)]
pub struct SdeInfo {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "buildNumber")]
    pub build_number: u64,
    #[serde(rename = "releaseDate")]
    pub release_date: String,
}

/// Download URL for a specific build
pub fn zip_url(build_number: u64) -> String {
    format!("{}{}-jsonl.zip", ZIP_URL_PREFIX, build_number)
}

pub struct SdeClient {
    client: Client,
}

impl SdeClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("eve-sde-render/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch the latest SDE build info
    pub fn fetch_latest_info(&self) -> Result<SdeInfo> {
        let response = self
            .client
            .get(LATEST_URL)
            .send()
            .and_then(|r| r.error_for_status())
            .context("Failed to fetch latest SDE info")?;

        let text = response.text().context("Failed to read response")?;
        let info: SdeInfo = serde_json::from_str(text.trim()).context("Failed to parse SDE info")?;

        Ok(info)
    }

    /// Download the zip for `build_number` to the given path
    pub fn download_zip(&self, build_number: u64, dest: &Path, ui: &mut impl Ui) -> Result<()> {
        let url = zip_url(build_number);
        let mut response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to start download: {}", url))?;

        let total_size = response.content_length().unwrap_or(0);

        let mut file = std::fs::File::create(dest)
            .with_context(|| format!("Failed to create destination file: {:?}", dest))?;

        let mut downloaded: u64 = 0;
        let mut buffer = [0u8; 8192];

        loop {
            let bytes_read = response
                .read(&mut buffer)
                .context("Failed to read from response")?;

            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read])
                .context("Failed to write to file")?;

            downloaded += bytes_read as u64;
            ui.set_progress(downloaded, total_size, format_bytes(downloaded, total_size));
        }

        ui.log(format!("Downloaded build {} ({})", build_number, format_bytes(downloaded, total_size)));
        Ok(())
    }
}

/// Format bytes as human-readable string
fn format_bytes(current: u64, total: u64) -> String {
    fn fmt(bytes: u64) -> String {
        if bytes >= 1_000_000_000 {
            format!("{:.1} GB", bytes as f64 / 1_000_000_000.0)
        } else if bytes >= 1_000_000 {
            format!("{:.1} MB", bytes as f64 / 1_000_000.0)
        } else if bytes >= 1_000 {
            format!("{:.1} KB", bytes as f64 / 1_000.0)
        } else {
            format!("{} B", bytes)
        }
    }
    format!("{} / {}", fmt(current), fmt(total))
}
