//! Dataset directory resolution and cache lookup.
//!
//! Pure path logic: nothing here downloads or creates files. The data
//! directory is always explicit; the library never consults ambient
//! process state.

use crate::{Result, YeastkernError};
use std::path::{Path, PathBuf};

/// Resolve the directory dedicated to one logical dataset.
///
/// An empty dataset name resolves to the data root itself, for datasets
/// whose files live directly there.
pub fn dataset_dir(data_dir: &Path, dataset_name: &str) -> PathBuf {
    if dataset_name.is_empty() {
        data_dir.to_path_buf()
    } else {
        data_dir.join(dataset_name)
    }
}

/// Return the absolute paths of a dataset's files if they all exist.
///
/// Fails with [`YeastkernError::MissingFile`] naming the first absent file;
/// no partial success.
pub fn locate(
    data_dir: &Path,
    dataset_name: &str,
    file_names: &[impl AsRef<str>],
) -> Result<Vec<PathBuf>> {
    let dir = dataset_dir(data_dir, dataset_name);
    let mut paths = Vec::with_capacity(file_names.len());
    for file_name in file_names {
        let full = dir.join(file_name.as_ref());
        if !full.exists() {
            return Err(YeastkernError::MissingFile(full));
        }
        paths.push(full);
    }
    Ok(paths)
}
