//! Dataset acquisition: sequential fetch and extraction over a URL list.
//!
//! A dataset directory is either fully populated or absent: any fetch
//! failure wipes the directory and aborts the whole acquisition, so no
//! permanently-corrupt state survives an aborted run.

use crate::archive;
use crate::dataset::cache;
use crate::network::{DownloadProgress, FileFetcher};
use crate::Result;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Orchestrates the file fetcher and archive extractor for a named dataset.
pub struct DatasetAcquirer {
    fetcher: FileFetcher,
    uncompress: bool,
}

impl DatasetAcquirer {
    /// Create an acquirer with default configuration.
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(FileFetcher::new()?))
    }

    /// Create an acquirer around a custom fetcher.
    pub fn with_fetcher(fetcher: FileFetcher) -> Self {
        Self {
            fetcher,
            uncompress: true,
        }
    }

    /// Keep downloaded archives compressed instead of extracting them.
    pub fn keep_compressed(mut self) -> Self {
        self.uncompress = false;
        self
    }

    /// Fetch every URL of a named dataset into its directory, extracting
    /// each archive in turn.
    ///
    /// Returns one base path per URL, in input order: the local archive
    /// path with its last extension stripped, which is where the caller
    /// finds the extracted artifact.
    ///
    /// A fetch failure deletes the entire dataset directory and aborts. An
    /// extraction failure triggers exactly one retry cycle (delete the
    /// corrupt archive, re-fetch, re-extract); a second extraction failure
    /// is fatal.
    pub async fn acquire(
        &self,
        dataset_name: &str,
        urls: &[String],
        data_dir: &Path,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<Vec<PathBuf>> {
        let dir = cache::dataset_dir(data_dir, dataset_name);
        std::fs::create_dir_all(&dir)
            .map_err(|e| crate::YeastkernError::io_with_path(e, &dir))?;

        let mut base_paths = Vec::with_capacity(urls.len());
        for url in urls {
            let archive_path = self.fetch_or_cleanup(url, &dir, progress_tx).await?;

            if self.uncompress {
                if let Err(first_err) = archive::extract(&archive_path, true) {
                    // One second chance for a corrupted archive, never a third.
                    warn!(
                        "Archive corrupted ({}), trying to download it again",
                        first_err
                    );
                    let _ = std::fs::remove_file(&archive_path);
                    let archive_path = self.fetch_or_cleanup(url, &dir, progress_tx).await?;
                    archive::extract(&archive_path, true)?;
                }
            }

            base_paths.push(archive_path.with_extension(""));
        }

        Ok(base_paths)
    }

    /// Fetch one URL; on failure, remove the whole dataset directory and
    /// propagate the error to abort the acquisition.
    async fn fetch_or_cleanup(
        &self,
        url: &str,
        dir: &Path,
        progress_tx: Option<&mpsc::Sender<DownloadProgress>>,
    ) -> Result<PathBuf> {
        match self.fetcher.fetch_with_retry(url, dir, progress_tx).await {
            Ok(path) => Ok(path),
            Err(e) => {
                error!("An error occurred fetching {}, aborting acquisition", url);
                let _ = std::fs::remove_dir_all(dir);
                Err(e)
            }
        }
    }
}
