//! Binary array cache persistence.
//!
//! Matrices and derived subset containers are serialized with bincode, one
//! file per artifact.

use crate::config::PathsConfig;
use crate::{Result, YeastkernError};
use ndarray::Array2;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// File name of a cached artifact for the given stem.
pub fn cache_file_name(stem: &str) -> String {
    format!("{}.{}", stem, PathsConfig::CACHE_EXTENSION)
}

/// Serialize a value to a cache file.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = bincode::serialize(value).map_err(|e| YeastkernError::Serialization {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, bytes).map_err(|e| YeastkernError::io_with_path(e, path))
}

/// Deserialize a value from a cache file.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|e| YeastkernError::io_with_path(e, path))?;
    bincode::deserialize(&bytes).map_err(|e| YeastkernError::Serialization {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Persist a matrix to a cache file.
pub fn save_matrix(path: &Path, matrix: &Array2<f64>) -> Result<()> {
    save(path, matrix)
}

/// Load a matrix from a cache file.
pub fn load_matrix(path: &Path) -> Result<Array2<f64>> {
    load(path)
}
