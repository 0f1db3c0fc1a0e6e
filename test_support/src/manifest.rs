//! Manifest parsing for assertions.
//!
//! Splits generated TSV output into a header and rows so tests can check
//! column counts and look up digests by algorithm name.

use anyhow::{Context, Result, ensure};

/// A manifest split into columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedManifest {
    /// Header columns, including the leading item label.
    pub header: Vec<String>,
    /// Data rows, each split on tabs.
    pub rows: Vec<Vec<String>>,
}

impl ParsedManifest {
    /// Digest of the row identified by `item` under `algorithm`.
    pub fn digest(&self, item: &str, algorithm: &str) -> Option<&str> {
        let column = self.header.iter().position(|name| name == algorithm)?;
        self.rows
            .iter()
            .find(|row| row.first().is_some_and(|id| id == item))
            .and_then(|row| row.get(column))
            .map(String::as_str)
    }

    /// Identifiers in row order.
    pub fn items(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.first().map(String::as_str))
            .collect()
    }
}

/// Parse `text`, requiring a trailing newline and at least a header line.
pub fn parse_manifest(text: &str) -> Result<ParsedManifest> {
    ensure!(text.ends_with('\n'), "manifest must end with a newline");
    let mut lines = text.lines();
    let header = lines
        .next()
        .context("manifest has no header")?
        .split('\t')
        .map(str::to_owned)
        .collect();
    let rows = lines
        .map(|line| line.split('\t').map(str::to_owned).collect())
        .collect();
    Ok(ParsedManifest { header, rows })
}
