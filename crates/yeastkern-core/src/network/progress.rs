//! Download progress events and the stderr reporter.
//!
//! Progress is purely informational: a single carriage-return-overwritten
//! line on the diagnostic stream, not a machine-readable channel.

use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Progress information for a download in flight.
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    /// Bytes downloaded so far.
    pub bytes_downloaded: u64,
    /// Total bytes, when the server sent a usable `Content-Length`.
    pub total_bytes: Option<u64>,
    /// Time elapsed since the transfer started.
    pub elapsed: Duration,
    /// Percentage complete (0-100). `None` when the total is unknown.
    pub percent: Option<f64>,
    /// Estimated seconds remaining. `None` when the total is unknown.
    pub eta_seconds: Option<f64>,
}

impl DownloadProgress {
    /// Build a progress event.
    ///
    /// The remaining-time estimate is `(100 - percent) / percent * elapsed`,
    /// with the divisor clamped to 0.01 so a transfer that has not yet
    /// reached a measurable percentage does not divide by zero.
    pub fn new(bytes_downloaded: u64, total_bytes: Option<u64>, elapsed: Duration) -> Self {
        let (percent, eta_seconds) = match total_bytes {
            Some(total) if total > 0 => {
                let percent = bytes_downloaded as f64 / total as f64 * 100.0;
                let eta = (100.0 - percent) / percent.max(0.01) * elapsed.as_secs_f64();
                (Some(percent), Some(eta))
            }
            _ => (None, None),
        };

        Self {
            bytes_downloaded,
            total_bytes,
            elapsed,
            percent,
            eta_seconds,
        }
    }
}

/// Spawn a task that renders progress events on stderr.
///
/// Each event overwrites the previous line; a final newline is written when
/// the sending side closes the channel.
pub fn spawn_stderr_reporter(mut rx: mpsc::Receiver<DownloadProgress>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut wrote_any = false;
        while let Some(progress) = rx.recv().await {
            wrote_any = true;
            let mut stderr = std::io::stderr().lock();
            match (progress.total_bytes, progress.percent, progress.eta_seconds) {
                (Some(total), Some(percent), Some(eta)) => {
                    let _ = write!(
                        stderr,
                        "\rDownloaded {} of {} bytes ({:.2}%, {} seconds remaining)",
                        progress.bytes_downloaded, total, percent, eta as i64
                    );
                }
                _ => {
                    let _ = write!(
                        stderr,
                        "\rDownloaded {} of ? bytes",
                        progress.bytes_downloaded
                    );
                }
            }
            let _ = stderr.flush();
        }
        if wrote_any {
            let _ = writeln!(std::io::stderr());
        }
    })
}
