//! The yeast genomic-kernel dataset: acquisition, caching and class-pair
//! subset derivation.
//!
//! Six precomputed kernel matrices and a 13-class label matrix are fetched
//! from the Noble lab server, converted into a binary array cache, and
//! served as a [`KernelBundle`]. Binary classification experiments use
//! [`YeastFetcher::fetch_class_pair`] to derive (and memoize) a subset
//! restricted to samples exclusive to one of two classes.

use crate::config::{PathsConfig, YeastConfig};
use crate::dataset::{cache, convert, store, DatasetAcquirer};
use crate::network::spawn_stderr_reporter;
use crate::subset::unique_indices;
use crate::{Result, YeastkernError};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// The full dataset: one matrix per kernel, the label matrix, and the
/// column-wise concatenation of all kernels.
#[derive(Debug, Clone)]
pub struct KernelBundle {
    /// Kernel matrices in concatenation order, keyed by name.
    pub kernels: Vec<(String, Array2<f64>)>,
    /// Per-sample per-class membership flags (1 member, -1 non-member).
    pub y: Array2<f64>,
    /// Combined feature matrix: all kernels concatenated along columns.
    pub k: Array2<f64>,
}

impl KernelBundle {
    /// Look up a kernel matrix by name.
    pub fn kernel(&self, name: &str) -> Option<&Array2<f64>> {
        self.kernels
            .iter()
            .find(|(kernel_name, _)| kernel_name == name)
            .map(|(_, matrix)| matrix)
    }
}

/// A dataset restricted to samples exclusive to one of two classes,
/// forming a binary classification problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPairSubset {
    /// Reduced kernel matrices, rows and columns restricted to the
    /// selected samples.
    pub kernels: Vec<(String, Array2<f64>)>,
    /// Binary labels: 1 for the first class, -1 for the second.
    pub y: Array1<f64>,
    /// Concatenation of the reduced kernels along columns.
    pub k: Array2<f64>,
}

/// The default data directory: `Data` under the current directory.
///
/// This is the only place ambient process state is consulted; every core
/// operation takes an explicit directory.
pub fn default_data_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(PathsConfig::DEFAULT_DATA_DIR_NAME)
}

/// Entry point for the yeast dataset, bound to one data directory.
pub struct YeastFetcher {
    data_dir: PathBuf,
    acquirer: DatasetAcquirer,
    report_progress: bool,
}

impl YeastFetcher {
    /// Create a fetcher storing data under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::with_acquirer(data_dir, DatasetAcquirer::new()?))
    }

    /// Create a fetcher around a custom acquirer.
    pub fn with_acquirer(data_dir: impl Into<PathBuf>, acquirer: DatasetAcquirer) -> Self {
        Self {
            data_dir: data_dir.into(),
            acquirer,
            report_progress: false,
        }
    }

    /// Enable or disable the stderr download progress line.
    pub fn report_progress(mut self, enabled: bool) -> Self {
        self.report_progress = enabled;
        self
    }

    /// The directory holding this dataset's cached files.
    pub fn dataset_dir(&self) -> PathBuf {
        cache::dataset_dir(&self.data_dir, YeastConfig::DATASET_NAME)
    }

    /// Return the full dataset, downloading and converting it if needed.
    ///
    /// With a populated cache this touches only the local binary files; no
    /// network request is made.
    pub async fn fetch_data(&self) -> Result<KernelBundle> {
        let dir = self.dataset_dir();
        self.ensure_kernels(&dir).await?;
        self.ensure_labels(&dir).await?;

        let mut kernels = Vec::with_capacity(YeastConfig::KERNEL_NAMES.len());
        for name in YeastConfig::KERNEL_NAMES {
            let path = dir.join(store::cache_file_name(name));
            kernels.push((name.to_string(), store::load_matrix(&path)?));
        }
        let labels_path = dir.join(store::cache_file_name(YeastConfig::LABELS_STEM));
        let y = store::load_matrix(&labels_path)?;
        let k = concat_columns(kernels.iter().map(|(_, matrix)| matrix))?;

        Ok(KernelBundle { kernels, y, k })
    }

    /// Return the binary classification subset for two classes.
    ///
    /// Classes are numbered from 1, matching the dataset documentation;
    /// the pair is order-sensitive (labels are 1 for `class1`). The derived
    /// subset is memoized on disk and any readable memo short-circuits
    /// recomputation entirely.
    pub async fn fetch_class_pair(&self, class1: usize, class2: usize) -> Result<ClassPairSubset> {
        for class in [class1, class2] {
            if class == 0 || class > YeastConfig::N_CLASSES {
                return Err(YeastkernError::ClassOutOfRange {
                    class,
                    n_classes: YeastConfig::N_CLASSES,
                });
            }
        }
        let (column_a, column_b) = (class1 - 1, class2 - 1);

        let memo_path = self.dataset_dir().join(format!(
            "{}__{}_{}.{}",
            YeastConfig::SUBSET_STEM,
            column_a,
            column_b,
            PathsConfig::CACHE_EXTENSION
        ));
        if memo_path.exists() {
            match store::load::<ClassPairSubset>(&memo_path) {
                Ok(subset) => return Ok(subset),
                Err(e) => warn!(
                    "Failed to load cached subset {}: {}; recomputing",
                    memo_path.display(),
                    e
                ),
            }
        }

        info!("Recomputing data for classes ({}, {})...", class1, class2);
        let data = self.fetch_data().await?;
        let indices = unique_indices(
            data.y.view(),
            column_a,
            column_b,
            YeastConfig::SUBSET_SAMPLES_PER_CLASS,
        );

        let mut kernels = Vec::with_capacity(data.kernels.len());
        for (name, matrix) in &data.kernels {
            let reduced = matrix
                .select(Axis(0), &indices)
                .select(Axis(1), &indices);
            kernels.push((name.clone(), reduced));
        }
        let y: Array1<f64> = indices
            .iter()
            .map(|&index| data.y[[index, column_a]])
            .collect();
        let k = concat_columns(kernels.iter().map(|(_, matrix)| matrix))?;

        let subset = ClassPairSubset { kernels, y, k };
        store::save(&memo_path, &subset)?;
        Ok(subset)
    }

    /// Binary problem for classes 5 and 7.
    pub async fn fetch_5_7(&self) -> Result<ClassPairSubset> {
        self.fetch_class_pair(5, 7).await
    }

    /// Binary problem for classes 5 and 12.
    pub async fn fetch_5_12(&self) -> Result<ClassPairSubset> {
        self.fetch_class_pair(5, 12).await
    }

    /// Binary problem for classes 7 and 12.
    pub async fn fetch_7_12(&self) -> Result<ClassPairSubset> {
        self.fetch_class_pair(7, 12).await
    }

    /// Make sure every kernel cache file exists, acquiring and converting
    /// the published text matrices on a miss.
    async fn ensure_kernels(&self, dir: &Path) -> Result<()> {
        let wanted: Vec<String> = YeastConfig::KERNEL_NAMES
            .iter()
            .map(|name| store::cache_file_name(name))
            .collect();
        match cache::locate(&self.data_dir, YeastConfig::DATASET_NAME, &wanted) {
            Ok(_) => return Ok(()),
            Err(YeastkernError::MissingFile(path)) => {
                info!("Kernel cache miss ({}), fetching dataset", path.display());
            }
            Err(e) => return Err(e),
        }

        let urls: Vec<String> = YeastConfig::KERNEL_NAMES
            .iter()
            .map(|name| format!("{}/{}.txt.gz", YeastConfig::BASE_URL, name))
            .collect();
        let text_paths = self.run_acquire(&urls).await?;

        for (index, text_path) in text_paths.iter().enumerate() {
            info!("Converting file {} of {}...", index + 1, text_paths.len());
            let cache_path = dir.join(store::cache_file_name(YeastConfig::KERNEL_NAMES[index]));
            self.convert_or_wipe(dir, text_path, &cache_path, true)?;
        }
        Ok(())
    }

    /// Same for the label matrix, which is published uncompressed and
    /// without a header row.
    async fn ensure_labels(&self, dir: &Path) -> Result<()> {
        let wanted = [store::cache_file_name(YeastConfig::LABELS_STEM)];
        match cache::locate(&self.data_dir, YeastConfig::DATASET_NAME, &wanted) {
            Ok(_) => return Ok(()),
            Err(YeastkernError::MissingFile(path)) => {
                info!("Label cache miss ({}), fetching labels", path.display());
            }
            Err(e) => return Err(e),
        }

        let urls = vec![format!(
            "{}/{}.txt",
            YeastConfig::BASE_URL,
            YeastConfig::LABELS_STEM
        )];
        let base_paths = self.run_acquire(&urls).await?;

        // Plain-text downloads are left in place by extraction; the base
        // path has the `.txt` stripped.
        let text_path = base_paths[0].with_extension("txt");
        let cache_path = dir.join(store::cache_file_name(YeastConfig::LABELS_STEM));
        self.convert_or_wipe(dir, &text_path, &cache_path, false)
    }

    /// Convert one text matrix; a conversion failure deletes the whole
    /// dataset directory so no half-converted cache persists.
    fn convert_or_wipe(
        &self,
        dir: &Path,
        text_path: &Path,
        cache_path: &Path,
        skip_header: bool,
    ) -> Result<()> {
        if let Err(e) = convert::convert_file(text_path, cache_path, skip_header) {
            error!("Impossible to convert the file {}: {}", text_path.display(), e);
            let _ = std::fs::remove_dir_all(dir);
            return Err(e);
        }
        Ok(())
    }

    async fn run_acquire(&self, urls: &[String]) -> Result<Vec<PathBuf>> {
        if self.report_progress {
            let (tx, rx) = mpsc::channel(32);
            let reporter = spawn_stderr_reporter(rx);
            let result = self
                .acquirer
                .acquire(YeastConfig::DATASET_NAME, urls, &self.data_dir, Some(&tx))
                .await;
            drop(tx);
            let _ = reporter.await;
            result
        } else {
            self.acquirer
                .acquire(YeastConfig::DATASET_NAME, urls, &self.data_dir, None)
                .await
        }
    }
}

/// Concatenate matrices along columns, preserving row alignment.
fn concat_columns<'a>(
    matrices: impl Iterator<Item = &'a Array2<f64>>,
) -> Result<Array2<f64>> {
    let views: Vec<_> = matrices.map(|matrix| matrix.view()).collect();
    ndarray::concatenate(Axis(1), &views).map_err(|e| YeastkernError::Shape {
        message: format!("Cannot concatenate kernels: {}", e),
    })
}
