//! yeastkern - fetch, cache and reshape the yeast genomic-kernel dataset.
//!
//! This crate downloads the precomputed kernel matrices and label matrix of
//! the yeast functional-classification dataset, converts the published text
//! tables into a binary array cache, and derives class-pair subsets for
//! binary classification experiments. Downloads are idempotent: files
//! already present in the data directory are never fetched again.
//!
//! # Example
//!
//! ```rust,ignore
//! use yeastkern_library::{default_data_dir, YeastFetcher};
//!
//! #[tokio::main]
//! async fn main() -> yeastkern_library::Result<()> {
//!     let fetcher = YeastFetcher::new(default_data_dir())?.report_progress(true);
//!
//!     // The full bundle: six kernels, labels, combined feature matrix.
//!     let data = fetcher.fetch_data().await?;
//!     println!("K is {} x {}", data.k.nrows(), data.k.ncols());
//!
//!     // A binary problem over classes 5 and 7.
//!     let pair = fetcher.fetch_5_7().await?;
//!     println!("{} samples selected", pair.y.len());
//!
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod config;
pub mod dataset;
pub mod error;
pub mod network;
pub mod subset;
pub mod yeast;

// Re-export commonly used types
pub use dataset::DatasetAcquirer;
pub use error::{Result, YeastkernError};
pub use network::{DownloadProgress, FileFetcher, HttpClient, RetryConfig};
pub use subset::unique_indices;
pub use yeast::{default_data_dir, ClassPairSubset, KernelBundle, YeastFetcher};
