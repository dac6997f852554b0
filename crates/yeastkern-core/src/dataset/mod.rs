//! Dataset acquisition and caching.
//!
//! This module provides:
//! - Cache lookup over a dataset's expected files
//! - Sequential acquisition (fetch + extract) of a URL list
//! - Text-to-binary matrix conversion
//! - Binary array cache persistence

mod acquire;
pub mod cache;
pub mod convert;
pub mod store;

pub use acquire::DatasetAcquirer;
pub use cache::{dataset_dir, locate};
