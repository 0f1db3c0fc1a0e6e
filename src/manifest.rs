//! Tab-separated manifest rendering.
//!
//! A manifest is one header line naming the item column and every registry
//! algorithm, followed by one line per item holding its identifier and the
//! lowercase hex digest under each algorithm. The layout is the fixture
//! contract consumed by downstream hash test suites and must stay
//! byte-for-byte stable.

use std::fmt;
use std::io::{BufWriter, Write};

use itertools::Itertools;

use crate::algorithm::{AlgorithmDigest, AlgorithmRegistry};
use crate::error::CorpusError;

/// Label of the leading manifest column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemColumn {
    /// Blob corpora identify rows by file name.
    Filename,
    /// Word corpora identify rows by the word itself.
    Word,
}

impl ItemColumn {
    /// Header text for this column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::Word => "word",
        }
    }
}

impl fmt::Display for ItemColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One manifest line: an item identifier and its digests in registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    /// Raw identifier bytes, written without escaping.
    pub identifier: Vec<u8>,
    /// Digests in registry order.
    pub digests: Vec<AlgorithmDigest>,
}

impl ManifestRow {
    /// Digest `content` under every registry algorithm.
    ///
    /// # Errors
    ///
    /// Propagates [`CorpusError::DigestComputation`] from the registry.
    pub fn compute(
        registry: &AlgorithmRegistry,
        identifier: Vec<u8>,
        content: &[u8],
    ) -> Result<Self, CorpusError> {
        Ok(Self {
            identifier,
            digests: registry.digest_all(content)?,
        })
    }

    /// Identifier interpreted as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn identifier_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.identifier)
    }
}

/// Render the header line for `column` and the registry's algorithms.
///
/// # Examples
///
/// ```
/// use digest_corpus::algorithm::AlgorithmRegistry;
/// use digest_corpus::manifest::{ItemColumn, render_header};
///
/// let registry = AlgorithmRegistry::standard()?;
/// assert_eq!(
///     render_header(ItemColumn::Word, &registry),
///     "word\tSHA1\tSHA256\tSHA224\tSHA512\tSHA384\tSHA512/224\tSHA512/256\n",
/// );
/// # Ok::<(), digest_corpus::CorpusError>(())
/// ```
#[must_use]
pub fn render_header(column: ItemColumn, registry: &AlgorithmRegistry) -> String {
    format!("{column}\t{}\n", registry.names().join("\t"))
}

/// Render one data line, including the trailing newline.
#[must_use]
pub fn render_row(row: &ManifestRow) -> Vec<u8> {
    let digest_width: usize = row.digests.iter().map(|d| d.bytes.len() * 2 + 1).sum();
    let mut line = Vec::with_capacity(row.identifier.len() + digest_width + 1);
    line.extend_from_slice(&row.identifier);
    for digest in &row.digests {
        line.push(b'\t');
        line.extend_from_slice(encode_hex(&digest.bytes).as_bytes());
    }
    line.push(b'\n');
    line
}

/// Lowercase hexadecimal encoding, two characters per byte.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        if let Err(err) = write!(&mut out, "{byte:02x}") {
            debug_assert!(false, "format hex byte failed: {err}");
        }
    }
    out
}

/// Streams a manifest to a writer, one line at a time.
pub struct ManifestWriter<W: Write> {
    out: BufWriter<W>,
    rows: usize,
}

impl<W: Write> ManifestWriter<W> {
    /// Wrap `out` in a buffered manifest writer.
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
            rows: 0,
        }
    }

    /// Write the header line.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::WriteManifest`] if the writer fails.
    pub fn write_header(
        &mut self,
        column: ItemColumn,
        registry: &AlgorithmRegistry,
    ) -> Result<(), CorpusError> {
        self.out
            .write_all(render_header(column, registry).as_bytes())
            .map_err(|source| CorpusError::WriteManifest { source })
    }

    /// Write one data line.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::WriteManifest`] if the writer fails.
    pub fn write_row(&mut self, row: &ManifestRow) -> Result<(), CorpusError> {
        self.out
            .write_all(&render_row(row))
            .map_err(|source| CorpusError::WriteManifest { source })?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data lines written so far.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Flush buffered output and return the row count.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::WriteManifest`] if flushing fails.
    pub fn finish(mut self) -> Result<usize, CorpusError> {
        self.out
            .flush()
            .map_err(|source| CorpusError::WriteManifest { source })?;
        Ok(self.rows)
    }
}
