//! Pipeline execution for the two binaries.
//!
//! Keeps `main` minimal: each entry point builds the registry, streams rows
//! from its generator into a [`ManifestWriter`], and reports how many rows
//! were written.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use miette::{GraphicalReportHandler, GraphicalTheme};
use tracing::{debug, info};

use crate::algorithm::AlgorithmRegistry;
use crate::blobs::{BlobCorpusGenerator, DirectorySink};
use crate::cli::BlobsCli;
use crate::error::CorpusError;
use crate::manifest::{ItemColumn, ManifestWriter};
use crate::words::WordCorpusProcessor;

/// Generate the blob corpus described by `cli`, writing the manifest to `out`.
///
/// # Errors
///
/// Returns an error if the registry fails its self-check, the output
/// directory cannot be written, or the manifest cannot be emitted.
pub fn run_blobs<W: Write>(cli: &BlobsCli, out: W) -> Result<usize> {
    let registry = AlgorithmRegistry::standard().context("initialise digest algorithms")?;
    let generator = BlobCorpusGenerator::new(&registry, cli.corpus_config())?;
    let sink = DirectorySink::open(&cli.output_dir)?;
    debug!(dir = %sink.path(), "writing blobs");

    let mut manifest = ManifestWriter::new(out);
    manifest.write_header(ItemColumn::Filename, &registry)?;
    for generated in generator.generate(sink) {
        let row = generated.with_context(|| format!("generate blob {}", manifest.rows()))?;
        manifest.write_row(&row)?;
    }
    let rows = manifest.finish()?;
    info!(
        blobs = rows,
        dir = %cli.output_dir,
        seed = generator.config().seed,
        "generated blob corpus"
    );
    Ok(rows)
}

/// Digest every word read from `input`, writing the manifest to `out`.
///
/// # Errors
///
/// Returns an error if the registry fails its self-check, `input` cannot be
/// read, or the manifest cannot be emitted.
pub fn run_words<R: Read, W: Write>(input: R, out: W) -> Result<usize> {
    let registry = AlgorithmRegistry::standard().context("initialise digest algorithms")?;
    let processor = WordCorpusProcessor::new(&registry);

    let mut manifest = ManifestWriter::new(out);
    manifest.write_header(ItemColumn::Word, &registry)?;
    for row in processor.process(input) {
        manifest.write_row(&row?)?;
    }
    let rows = manifest.finish()?;
    info!(words = rows, "digested word corpus");
    Ok(rows)
}

/// Render a failure for the terminal.
///
/// Errors carrying a [`CorpusError`] are drawn by miette so their diagnostic
/// code and help text are shown; anything else falls back to the anyhow
/// context chain.
#[must_use]
pub fn render_failure(err: &anyhow::Error) -> String {
    let Some(diagnostic) = err.downcast_ref::<CorpusError>() else {
        return format!("{err:#}");
    };
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    match handler.render_report(&mut out, diagnostic) {
        Ok(()) => out,
        Err(_) => format!("{err:#}"),
    }
}
