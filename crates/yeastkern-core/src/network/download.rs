//! File fetcher with progress reporting.
//!
//! Provides:
//! - Cache-hit short-circuit (an existing local file is never re-fetched)
//! - Streaming download to a temp file, renamed into place on success
//! - Progress events over an optional channel
//! - Bounded retry for transient failures

use crate::config::NetworkConfig;
use crate::network::client::HttpClient;
use crate::network::progress::DownloadProgress;
use crate::network::retry::{retry_async, RetryConfig};
use crate::{Result, YeastkernError};
use futures::StreamExt;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};
use url::Url;

/// Downloads a single remote resource into a destination directory.
pub struct FileFetcher {
    http: Arc<HttpClient>,
    /// Minimum interval between progress events.
    progress_interval: Duration,
    /// Retry policy for transient transport failures.
    retry: RetryConfig,
}

impl FileFetcher {
    /// Create a new fetcher with default configuration.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(Arc::new(HttpClient::new()?)))
    }

    /// Create a fetcher with a custom HTTP client.
    pub fn with_client(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            progress_interval: NetworkConfig::DOWNLOAD_PROGRESS_INTERVAL,
            retry: RetryConfig::new()
                .with_max_attempts(NetworkConfig::DOWNLOAD_RETRY_ATTEMPTS),
        }
    }

    /// Override the retry policy.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Derive the local file name from the URL's final path segment.
    pub fn file_name_for(url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| YeastkernError::Config {
            message: format!("Invalid URL {}: {}", url, e),
        })?;
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| YeastkernError::Config {
                message: format!("URL has no file name: {}", url),
            })
    }

    /// Fetch `url` into `dest_dir`, returning the local path.
    ///
    /// If a file with the URL's basename already exists under `dest_dir` it
    /// is returned immediately with no network access and no staleness
    /// check. Otherwise the body is streamed to `<name>.part` and renamed
    /// onto the final path, so a failed transfer never leaves a partial
    /// file behind.
    pub async fn fetch(
        &self,
        url: &str,
        dest_dir: &Path,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<PathBuf> {
        let file_name = Self::file_name_for(url)?;
        let destination = dest_dir.join(&file_name);

        if destination.exists() {
            debug!("Cache hit for {}, skipping download", destination.display());
            return Ok(destination);
        }

        if !dest_dir.exists() {
            std::fs::create_dir_all(dest_dir)
                .map_err(|e| YeastkernError::io_with_path(e, dest_dir))?;
        }

        let temp_path = PathBuf::from(format!(
            "{}{}",
            destination.display(),
            NetworkConfig::DOWNLOAD_TEMP_SUFFIX
        ));

        info!("Downloading data from {} ...", url);
        let t0 = Instant::now();
        let result = self.stream_to_file(url, &temp_path, progress_tx).await;

        match result {
            Ok(bytes) => {
                std::fs::rename(&temp_path, &destination).map_err(|e| {
                    let _ = std::fs::remove_file(&temp_path);
                    YeastkernError::io_with_path(e, &destination)
                })?;
                let dt = t0.elapsed().as_secs();
                info!(
                    "...done. {} bytes to {} ({} seconds, {} min)",
                    bytes,
                    destination.display(),
                    dt,
                    dt / 60
                );
                Ok(destination)
            }
            Err(e) => {
                let _ = std::fs::remove_file(&temp_path);
                Err(e)
            }
        }
    }

    /// Fetch with the configured bounded retry for transient failures.
    pub async fn fetch_with_retry(
        &self,
        url: &str,
        dest_dir: &Path,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<PathBuf> {
        retry_async(
            &self.retry,
            || self.fetch(url, dest_dir, progress_tx),
            YeastkernError::is_retryable,
        )
        .await
    }

    async fn stream_to_file(
        &self,
        url: &str,
        temp_path: &Path,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<u64> {
        let response = self.http.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(YeastkernError::DownloadFailed {
                url: url.to_string(),
                message: format!("HTTP status {}", status),
            });
        }

        let total_bytes = response.content_length();
        let file = std::fs::File::create(temp_path)
            .map_err(|e| YeastkernError::io_with_path(e, temp_path))?;
        // The file handle closes on every exit path when the writer drops.
        let mut writer = BufWriter::with_capacity(NetworkConfig::DOWNLOAD_CHUNK_SIZE, file);

        let t0 = Instant::now();
        let mut bytes_downloaded: u64 = 0;
        let mut last_progress_update = Instant::now();
        let mut stream = response.bytes_stream();

        if let Some(tx) = progress_tx {
            let _ = tx
                .send(DownloadProgress::new(0, total_bytes, t0.elapsed()))
                .await;
        }

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| YeastkernError::Network {
                message: format!("Error reading download stream: {}", e),
                cause: Some(url.to_string()),
            })?;

            writer
                .write_all(&chunk)
                .map_err(|e| YeastkernError::io_with_path(e, temp_path))?;
            bytes_downloaded += chunk.len() as u64;

            if last_progress_update.elapsed() >= self.progress_interval {
                if let Some(tx) = progress_tx {
                    let _ = tx
                        .send(DownloadProgress::new(
                            bytes_downloaded,
                            total_bytes,
                            t0.elapsed(),
                        ))
                        .await;
                }
                last_progress_update = Instant::now();
            }
        }

        writer
            .flush()
            .map_err(|e| YeastkernError::io_with_path(e, temp_path))?;

        if let Some(tx) = progress_tx {
            let _ = tx
                .send(DownloadProgress::new(
                    bytes_downloaded,
                    total_bytes,
                    t0.elapsed(),
                ))
                .await;
        }

        Ok(bytes_downloaded)
    }
}
