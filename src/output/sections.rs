//! Markdown to JSON section conversion
//!
//! The concatenated Markdown document is split on top-level headings
//! (`# Title`). Each heading opens a [`Section`] that collects every following
//! line, sub-headings and blank lines included, until the next top-level
//! heading. Lines before the first top-level heading belong to no section and
//! are dropped.

use crate::output::traits::OutputResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One top-level heading and the lines that follow it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: Vec<String>,
}

/// Section being accumulated while scanning lines
#[derive(Debug, Default)]
struct PendingSection {
    title: Option<String>,
    content: Vec<String>,
}

impl PendingSection {
    fn titled(title: String) -> Self {
        Self {
            title: Some(title),
            content: Vec::new(),
        }
    }

    /// Returns the finished section, or `None` when no heading was seen yet
    fn finish(self) -> Option<Section> {
        let content = self.content;
        self.title.map(|title| Section { title, content })
    }
}

/// Splits a Markdown document into sections
///
/// Only lines starting with exactly `"# "` are section boundaries. The title
/// is the heading line with `#` characters and whitespace trimmed from both
/// ends; every other line is stored whitespace-trimmed.
///
/// # Example
///
/// ```
/// use doc_scraper::output::parse_sections;
///
/// let sections = parse_sections("# A\nx\n# B\ny\n");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].title, "A");
/// assert_eq!(sections[1].content, vec!["y".to_string()]);
/// ```
pub fn parse_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = PendingSection::default();

    for line in markdown.lines() {
        if line.starts_with("# ") {
            let title = line
                .trim_matches(|c: char| c == '#' || c.is_whitespace())
                .to_string();
            let finished = std::mem::replace(&mut current, PendingSection::titled(title));
            sections.extend(finished.finish());
        } else {
            current.content.push(line.trim().to_string());
        }
    }

    sections.extend(current.finish());
    sections
}

/// Serializes sections as pretty-printed JSON (2-space indent, UTF-8 kept)
pub fn sections_to_json(sections: &[Section]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(sections)?)
}

/// Converts a Markdown file into a JSON file of sections
///
/// The JSON file is overwritten if it exists.
///
/// # Arguments
///
/// * `md_path` - The Markdown document to read
/// * `json_path` - Destination of the JSON array
///
/// # Returns
///
/// * `Ok(usize)` - Number of sections written
/// * `Err(OutputError)` - Reading, serializing or writing failed
pub fn convert_md_to_json(md_path: &Path, json_path: &Path) -> OutputResult<usize> {
    let markdown = std::fs::read_to_string(md_path)?;
    let sections = parse_sections(&markdown);

    let json = sections_to_json(&sections)?;
    std::fs::write(json_path, json)?;

    tracing::debug!(
        "Wrote {} sections from {} to {}",
        sections.len(),
        md_path.display(),
        json_path.display()
    );

    Ok(sections.len())
}
