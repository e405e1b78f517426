//! Download-and-place pipeline
//!
//! Fetches a derived artifact URL to a temporary file, then moves it into
//! the configured destination directory preserving the filename. Failures
//! here are logged and dropped; the webhook response has already been sent
//! and the repository will notify again on the next deploy.

use crate::error::{ListenerError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

/// Last path segment of a derived URL, i.e. the asset filename.
pub fn asset_filename(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|s| !s.is_empty())
}

/// Fetch the artifact into the system temp directory.
pub async fn download_to_temp(client: &reqwest::Client, url: &str) -> Result<PathBuf> {
    let filename = asset_filename(url)
        .ok_or_else(|| ListenerError::DownloadFailed(format!("No filename in URL '{}'", url)))?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ListenerError::DownloadFailed(format!(
            "GET {} returned {}",
            url,
            response.status()
        )));
    }

    let body = response.bytes().await?;
    let tmp_path = std::env::temp_dir().join(filename);
    fs::write(&tmp_path, &body).await?;
    info!("Downloaded {} ({} bytes) to {:?}", url, body.len(), tmp_path);

    Ok(tmp_path)
}

/// Move a downloaded file into the destination directory, keeping its name.
/// Falls back to copy-and-remove when rename fails (e.g. across filesystems).
pub async fn move_into_place(tmp_path: &Path, destination_dir: &Path) -> Result<PathBuf> {
    let filename = tmp_path.file_name().ok_or_else(|| {
        ListenerError::DownloadFailed(format!("No filename in path {:?}", tmp_path))
    })?;
    let out_path = destination_dir.join(filename);

    if fs::rename(tmp_path, &out_path).await.is_err() {
        fs::copy(tmp_path, &out_path).await?;
        fs::remove_file(tmp_path).await?;
    }

    Ok(out_path)
}

/// Run the full pipeline for one derived URL, logging the outcome.
pub async fn fetch_and_place(client: &reqwest::Client, url: &str, destination_dir: &Path) {
    match download_to_temp(client, url).await {
        Ok(tmp_path) => match move_into_place(&tmp_path, destination_dir).await {
            Ok(out_path) => info!("Artifact placed at {:?}", out_path),
            Err(e) => error!("Failed to move downloaded artifact into place: {}", e),
        },
        Err(e) => error!("Failed to download {}: {}", url, e),
    }
}
