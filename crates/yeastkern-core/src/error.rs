//! Error types for the yeastkern library.
//!
//! This module defines the error taxonomy for the fetch/cache/convert
//! pipeline and the subset derivation layer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for yeastkern operations.
#[derive(Debug, Error)]
pub enum YeastkernError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    // Archive errors
    #[error("Extraction failed for {path:?}: {message}")]
    Extraction { path: PathBuf, message: String },

    // Cache errors
    #[error("No such file: {0}")]
    MissingFile(PathBuf),

    #[error("Conversion failed for {path:?}: {message}")]
    Conversion { path: PathBuf, message: String },

    #[error("Serialization error at {path:?}: {message}")]
    Serialization { path: PathBuf, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Shape/selection errors
    #[error("Shape error: {message}")]
    Shape { message: String },

    #[error("Class {class} out of range: dataset has {n_classes} classes")]
    ClassOutOfRange { class: usize, n_classes: usize },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for yeastkern operations.
pub type Result<T> = std::result::Result<T, YeastkernError>;

// Conversion implementations for common error types

impl From<std::io::Error> for YeastkernError {
    fn from(err: std::io::Error) -> Self {
        YeastkernError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for YeastkernError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            YeastkernError::Timeout(std::time::Duration::from_secs(0))
        } else {
            YeastkernError::Network {
                message: err.to_string(),
                cause: err.url().map(|u| u.to_string()),
            }
        }
    }
}

impl YeastkernError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        YeastkernError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Check if this error should trigger a retry.
    ///
    /// Transient transport failures are retryable; cache misses, conversion
    /// failures and structural errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            YeastkernError::Network { .. }
                | YeastkernError::Timeout(_)
                | YeastkernError::DownloadFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = YeastkernError::MissingFile(PathBuf::from("/data/labels.bin"));
        assert_eq!(err.to_string(), "No such file: /data/labels.bin");

        let err = YeastkernError::ClassOutOfRange {
            class: 14,
            n_classes: 13,
        };
        assert_eq!(
            err.to_string(),
            "Class 14 out of range: dataset has 13 classes"
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(YeastkernError::Timeout(std::time::Duration::from_secs(5)).is_retryable());
        assert!(YeastkernError::DownloadFailed {
            url: "http://example.com/a".into(),
            message: "status 503".into(),
        }
        .is_retryable());
        assert!(!YeastkernError::MissingFile(PathBuf::from("x")).is_retryable());
        assert!(!YeastkernError::Conversion {
            path: PathBuf::from("x.txt"),
            message: "bad token".into(),
        }
        .is_retryable());
    }

    #[test]
    fn test_io_with_path_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = YeastkernError::io_with_path(io, "/data");
        match err {
            YeastkernError::Io { path, source, .. } => {
                assert_eq!(path, Some(PathBuf::from("/data")));
                assert!(source.is_some());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
