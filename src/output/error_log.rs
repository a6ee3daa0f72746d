//! Append-only failure log
//!
//! Every recoverable failure (unreachable page, page without readable content)
//! becomes one timestamped line in a plain text file. The file is opened once
//! in append mode and is never read back by the program.

use crate::output::traits::{FailureLog, OutputResult};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Timestamp layout of each log line, e.g. `2024-03-01 14:05:09,042`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// File-backed [`FailureLog`]
#[derive(Debug)]
pub struct FileFailureLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileFailureLog {
    /// Opens (creating if needed) the log file in append mode
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the log file
    ///
    /// # Returns
    ///
    /// * `Ok(FileFailureLog)` - Log ready for appending
    /// * `Err(OutputError)` - The file could not be opened
    pub fn open(path: &Path) -> OutputResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }
}

impl FailureLog for FileFailureLog {
    fn record_failure(&self, url: &str, detail: &str) {
        tracing::error!(url = %url, "{}", detail);

        let line = format_line(&Local::now().format(TIMESTAMP_FORMAT).to_string(), detail);

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
            tracing::warn!("Failed to write to {}: {}", self.path.display(), e);
        }
    }
}

/// Formats a single log line
fn format_line(timestamp: &str, detail: &str) -> String {
    // One record per line, whatever the error text contains
    let detail = detail.replace(['\r', '\n'], " ");
    format!("{} - {}\n", timestamp, detail)
}
