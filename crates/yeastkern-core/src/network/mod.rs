//! Network utilities for HTTP operations and downloads.
//!
//! This module provides:
//! - Retry logic with exponential backoff and jitter
//! - A thin HTTP client wrapper
//! - File download with caching and progress reporting

mod client;
mod download;
mod progress;
mod retry;

pub use client::HttpClient;
pub use download::FileFetcher;
pub use progress::{spawn_stderr_reporter, DownloadProgress};
pub use retry::{retry_async, RetryConfig};
