//! Seeded pseudorandom blob corpus.
//!
//! [`BlobCorpusGenerator`] draws `count` blobs from a [`GlibcRandom`]
//! stream, hands each one to a [`BlobSink`], and yields its manifest row
//! before drawing the next. Only one blob is held in memory at a time.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::algorithm::AlgorithmRegistry;
use crate::error::CorpusError;
use crate::manifest::ManifestRow;
use crate::rng::GlibcRandom;

/// Seed used by the reference corpus.
pub const DEFAULT_SEED: u32 = 1337;
/// Number of blobs in the reference corpus.
pub const DEFAULT_COUNT: usize = 2048;
/// Exclusive upper bound on blob length in the reference corpus.
pub const DEFAULT_MAX_LENGTH: usize = 8192;

/// Parameters controlling blob generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobCorpusConfig {
    /// PRNG seed.
    pub seed: u32,
    /// Number of blobs to generate.
    pub count: usize,
    /// Exclusive upper bound on blob length; must be positive.
    pub max_length: usize,
}

impl Default for BlobCorpusConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            count: DEFAULT_COUNT,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// File name of the blob at `index`.
#[must_use]
pub fn blob_name(index: usize) -> String {
    format!("blob{index}.bin")
}

/// Destination for generated blob content.
pub trait BlobSink {
    /// Persist `content` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::WriteBlob`] if the content cannot be stored.
    fn store(&mut self, name: &str, content: &[u8]) -> Result<(), CorpusError>;
}

/// Writes blobs as files inside an output directory.
#[derive(Debug)]
pub struct DirectorySink {
    dir: Dir,
    path: Utf8PathBuf,
}

impl DirectorySink {
    /// Open `path` for writing blob files.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::OpenOutputDir`] if the directory cannot be
    /// opened.
    pub fn open(path: &Utf8Path) -> Result<Self, CorpusError> {
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| {
            CorpusError::OpenOutputDir {
                path: path.to_owned(),
                source,
            }
        })?;
        Ok(Self {
            dir,
            path: path.to_owned(),
        })
    }

    /// Directory the sink writes into.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl BlobSink for DirectorySink {
    fn store(&mut self, name: &str, content: &[u8]) -> Result<(), CorpusError> {
        self.dir
            .write(name, content)
            .map_err(|source| CorpusError::WriteBlob {
                name: name.to_owned(),
                source,
            })?;
        debug!(dir = %self.path, blob = name, len = content.len(), "wrote blob");
        Ok(())
    }
}

/// Sink that drops every blob; useful when only the manifest is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl BlobSink for DiscardSink {
    fn store(&mut self, _name: &str, _content: &[u8]) -> Result<(), CorpusError> {
        Ok(())
    }
}

impl<S: BlobSink + ?Sized> BlobSink for &mut S {
    fn store(&mut self, name: &str, content: &[u8]) -> Result<(), CorpusError> {
        (**self).store(name, content)
    }
}

/// Generates the seeded blob corpus.
#[derive(Debug)]
pub struct BlobCorpusGenerator<'a> {
    registry: &'a AlgorithmRegistry,
    config: BlobCorpusConfig,
}

impl<'a> BlobCorpusGenerator<'a> {
    /// Create a generator over `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::InvalidConfig`] if `config.max_length` is zero.
    pub fn new(
        registry: &'a AlgorithmRegistry,
        config: BlobCorpusConfig,
    ) -> Result<Self, CorpusError> {
        if config.max_length == 0 {
            return Err(CorpusError::InvalidConfig {
                reason: "maximum blob length must be positive".into(),
            });
        }
        Ok(Self { registry, config })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> BlobCorpusConfig {
        self.config
    }

    /// Start generating, storing each blob in `sink`.
    ///
    /// The iterator stops after the first error.
    pub fn generate<S: BlobSink>(&self, sink: S) -> BlobRows<'a, S> {
        BlobRows {
            registry: self.registry,
            rng: GlibcRandom::new(self.config.seed),
            sink,
            max_length: self.config.max_length,
            next_index: 0,
            count: self.config.count,
            failed: false,
        }
    }
}

/// Iterator yielding one manifest row per generated blob.
#[derive(Debug)]
pub struct BlobRows<'a, S> {
    registry: &'a AlgorithmRegistry,
    rng: GlibcRandom,
    sink: S,
    max_length: usize,
    next_index: usize,
    count: usize,
    failed: bool,
}

impl<S: BlobSink> BlobRows<'_, S> {
    /// Draw the next blob: a length in `0..max_length`, then that many bytes.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "reduction modulo the range keeps the reference draw sequence"
    )]
    fn draw_blob(&mut self) -> Vec<u8> {
        let len = widen(self.rng.next_u31()) % self.max_length;
        (0..len).map(|_| low_byte(self.rng.next_u31())).collect()
    }

    fn next_row(&mut self, index: usize) -> Result<ManifestRow, CorpusError> {
        let content = self.draw_blob();
        let name = blob_name(index);
        self.sink.store(&name, &content)?;
        ManifestRow::compute(self.registry, name.into_bytes(), &content)
    }
}

impl<S: BlobSink> Iterator for BlobRows<'_, S> {
    type Item = Result<ManifestRow, CorpusError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index >= self.count {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        let row = self.next_row(index);
        self.failed = row.is_err();
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.count.saturating_sub(self.next_index);
        (0, Some(remaining))
    }
}

impl<S: BlobSink> std::iter::FusedIterator for BlobRows<'_, S> {}

fn widen(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "each blob byte is the draw reduced modulo 256"
)]
const fn low_byte(value: u32) -> u8 {
    value as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::{Result, ensure};
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemorySink {
        blobs: BTreeMap<String, Vec<u8>>,
    }

    impl BlobSink for MemorySink {
        fn store(&mut self, name: &str, content: &[u8]) -> Result<(), CorpusError> {
            self.blobs.insert(name.to_owned(), content.to_vec());
            Ok(())
        }
    }

    struct FailingSink;

    impl BlobSink for FailingSink {
        fn store(&mut self, name: &str, _content: &[u8]) -> Result<(), CorpusError> {
            Err(CorpusError::WriteBlob {
                name: name.to_owned(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn small_config() -> BlobCorpusConfig {
        BlobCorpusConfig {
            count: 16,
            max_length: 64,
            ..BlobCorpusConfig::default()
        }
    }

    #[test]
    fn names_follow_index() {
        assert_eq!(blob_name(0), "blob0.bin");
        assert_eq!(blob_name(2047), "blob2047.bin");
    }

    #[test]
    fn rows_reference_stored_content() -> Result<()> {
        let registry = AlgorithmRegistry::standard()?;
        let generator = BlobCorpusGenerator::new(&registry, small_config())?;
        let mut sink = MemorySink::default();
        let rows = generator
            .generate(&mut sink)
            .collect::<Result<Vec<_>, _>>()?;
        ensure!(rows.len() == 16, "expected 16 rows, got {}", rows.len());
        for row in &rows {
            let name = row.identifier_lossy().into_owned();
            let content = sink.blobs.get(&name);
            ensure!(content.is_some(), "{name} was not stored");
            let stored = content.map(Vec::as_slice).unwrap_or_default();
            ensure!(stored.len() < 64, "{name} exceeds max length");
            ensure!(
                row.digests == registry.digest_all(stored)?,
                "{name} digests do not match stored content"
            );
        }
        Ok(())
    }

    #[test]
    fn generation_is_reproducible() -> Result<()> {
        let registry = AlgorithmRegistry::standard()?;
        let generator = BlobCorpusGenerator::new(&registry, small_config())?;
        let mut first = MemorySink::default();
        let mut second = MemorySink::default();
        let rows_a = generator.generate(&mut first).collect::<Result<Vec<_>, _>>()?;
        let rows_b = generator.generate(&mut second).collect::<Result<Vec<_>, _>>()?;
        ensure!(rows_a == rows_b, "manifests differ between runs");
        ensure!(first.blobs == second.blobs, "blob contents differ between runs");
        Ok(())
    }

    #[test]
    fn different_seeds_diverge() -> Result<()> {
        let registry = AlgorithmRegistry::standard()?;
        let other = BlobCorpusConfig {
            seed: 7,
            ..small_config()
        };
        let rows_a = BlobCorpusGenerator::new(&registry, small_config())?
            .generate(DiscardSink)
            .collect::<Result<Vec<_>, _>>()?;
        let rows_b = BlobCorpusGenerator::new(&registry, other)?
            .generate(DiscardSink)
            .collect::<Result<Vec<_>, _>>()?;
        ensure!(rows_a != rows_b, "seeds 1337 and 7 produced the same corpus");
        Ok(())
    }

    #[test]
    fn length_one_bound_yields_empty_blobs() -> Result<()> {
        let registry = AlgorithmRegistry::standard()?;
        let config = BlobCorpusConfig {
            count: 3,
            max_length: 1,
            ..BlobCorpusConfig::default()
        };
        let empty = registry.digest_all(&[])?;
        for row in BlobCorpusGenerator::new(&registry, config)?.generate(DiscardSink) {
            ensure!(row?.digests == empty, "zero-length blob must hash as empty input");
        }
        Ok(())
    }

    #[test]
    fn zero_max_length_is_rejected() -> Result<()> {
        let registry = AlgorithmRegistry::standard()?;
        let config = BlobCorpusConfig {
            max_length: 0,
            ..BlobCorpusConfig::default()
        };
        ensure!(
            matches!(
                BlobCorpusGenerator::new(&registry, config),
                Err(CorpusError::InvalidConfig { .. })
            ),
            "zero max length should be rejected"
        );
        Ok(())
    }

    #[test]
    fn sink_failure_stops_iteration() -> Result<()> {
        let registry = AlgorithmRegistry::standard()?;
        let generator = BlobCorpusGenerator::new(&registry, small_config())?;
        let mut rows = generator.generate(FailingSink);
        ensure!(
            matches!(rows.next(), Some(Err(CorpusError::WriteBlob { .. }))),
            "first row should report the sink failure"
        );
        ensure!(rows.next().is_none(), "iterator must stop after an error");
        Ok(())
    }
}
