//! Output traits and error types
//!
//! This module defines the failure-reporting interface threaded through the
//! page-level operations and the errors raised while writing output files.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Sink for recoverable per-page failures
///
/// One instance is built by the entry point and passed by reference to the
/// operations that fetch pages. Recording never fails from the caller's
/// point of view; a broken log must not stop a crawl.
pub trait FailureLog {
    /// Records that `url` could not contribute content, with the reason
    ///
    /// # Arguments
    ///
    /// * `url` - The page that failed
    /// * `detail` - Human-readable failure description, already including the URL
    fn record_failure(&self, url: &str, detail: &str);
}

impl<T: FailureLog + ?Sized> FailureLog for &T {
    fn record_failure(&self, url: &str, detail: &str) {
        (**self).record_failure(url, detail)
    }
}
