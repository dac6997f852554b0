//! Centralized configuration for the yeastkern library.
//!
//! Network parameters, on-disk layout constants and the yeast dataset
//! definition live here so the core logic never reads ambient process state.

use std::time::Duration;

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    /// Connect timeout for HTTP requests. No total request timeout is set;
    /// a streamed body takes as long as the transport allows.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;
    pub const DOWNLOAD_PROGRESS_INTERVAL: Duration = Duration::from_millis(500);
    pub const DOWNLOAD_TEMP_SUFFIX: &'static str = ".part";
    /// Attempts per download, including the first one.
    pub const DOWNLOAD_RETRY_ATTEMPTS: u32 = 2;
    pub const USER_AGENT: &'static str = "yeastkern-library/0.1";
}

/// On-disk layout configuration.
pub struct PathsConfig;

impl PathsConfig {
    /// Directory name resolved against the current directory by
    /// [`crate::yeast::default_data_dir`]. Core functions always take an
    /// explicit data directory.
    pub const DEFAULT_DATA_DIR_NAME: &'static str = "Data";
    /// Extension of the binary array cache files.
    pub const CACHE_EXTENSION: &'static str = "bin";
}

/// Yeast genomic-kernel dataset definition.
///
/// Documentation and data: <http://noble.gs.washington.edu/yeast/>
pub struct YeastConfig;

impl YeastConfig {
    pub const BASE_URL: &'static str = "http://noble.gs.washington.edu/yeast";

    /// The yeast files live directly in the data root, so the dataset has no
    /// subdirectory of its own.
    pub const DATASET_NAME: &'static str = "";

    /// Kernel matrices composing the combined feature representation, in
    /// concatenation order. Each is published as `<name>.txt.gz`.
    pub const KERNEL_NAMES: [&'static str; 6] = [
        "kernel_matrix_tap_n_3588",
        "kernel_matrix_mpi_n_3588",
        "kernel_matrix_mgi_n_3588",
        "kernel_matrix_exp_gauss_n_3588",
        "kernel_matrix_pfamdom_exp_cn_3588",
        "kernel_matrix_sw_cn_3588",
    ];

    /// Label matrix file stem; published as `<stem>.txt`, uncompressed.
    pub const LABELS_STEM: &'static str = "labels_3588_13";

    /// Number of functional classes in the label matrix.
    pub const N_CLASSES: usize = 13;

    /// Samples retained per class when deriving a class-pair subset.
    pub const SUBSET_SAMPLES_PER_CLASS: usize = 100;

    /// File-name stem of derived class-pair subset caches:
    /// `<stem>__<classA>_<classB>.<ext>` with zero-based class columns.
    pub const SUBSET_STEM: &'static str = "yeast_data";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_constants_are_reasonable() {
        assert!(NetworkConfig::CONNECT_TIMEOUT > Duration::ZERO);
        assert_eq!(NetworkConfig::DOWNLOAD_CHUNK_SIZE, 8192);
        assert!(NetworkConfig::DOWNLOAD_RETRY_ATTEMPTS >= 1);
    }

    #[test]
    fn test_kernel_names_are_distinct() {
        let mut names = YeastConfig::KERNEL_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), YeastConfig::KERNEL_NAMES.len());
    }
}
