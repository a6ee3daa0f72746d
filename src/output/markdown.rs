//! Markdown document output
//!
//! Converted pages are appended to two files at once: the dated full document
//! and the fixed-name partial document. Both are truncated when opened and
//! flushed after every page, so an interrupted run leaves every completed
//! page on disk.

use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Paired writer for the full and partial Markdown files
///
/// Both files are closed when the writer is dropped, whichever way the crawl
/// loop ends.
#[derive(Debug)]
pub struct MarkdownOutput {
    full: BufWriter<File>,
    partial: BufWriter<File>,
}

impl MarkdownOutput {
    /// Creates (or truncates) both output files
    ///
    /// # Arguments
    ///
    /// * `full_path` - The dated Markdown document
    /// * `partial_path` - The safety-net copy, overwritten on every run
    ///
    /// # Returns
    ///
    /// * `Ok(MarkdownOutput)` - Both files open for writing
    /// * `Err(OutputError)` - Either file could not be created
    pub fn create(full_path: &Path, partial_path: &Path) -> OutputResult<Self> {
        let full = BufWriter::new(File::create(full_path)?);
        let partial = BufWriter::new(File::create(partial_path)?);

        Ok(Self { full, partial })
    }

    /// Appends one converted page to both files and flushes them
    ///
    /// An empty page contributes nothing.
    pub fn write_page(&mut self, page: &str) -> OutputResult<()> {
        self.full.write_all(page.as_bytes())?;
        self.partial.write_all(page.as_bytes())?;
        self.full.flush()?;
        self.partial.flush()?;
        Ok(())
    }

    /// Flushes and closes both files, reporting any pending write error
    pub fn finish(self) -> OutputResult<()> {
        let full = self.full.into_inner().map_err(|e| e.into_error())?;
        let partial = self.partial.into_inner().map_err(|e| e.into_error())?;
        full.sync_all()?;
        partial.sync_all()?;
        Ok(())
    }
}
