//! Error types shared by the corpus pipelines.
//!
//! Every failure in this crate is fatal: callers propagate these errors to
//! the binary entry point, which reports them and exits non-zero.

// The unused_assignments lint fires in some Rust versions due to
// thiserror/miette derive macro expansion. `#[expect]` fails when the lint
// does not fire, so `#[allow]` is required here.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Errors raised while building a registry or generating a corpus.
#[derive(Debug, Error, Diagnostic)]
pub enum CorpusError {
    /// A digest algorithm failed its startup self-check.
    #[error(
        "digest algorithm {algorithm} produced {actual} bytes at start-up, expected {expected}"
    )]
    #[diagnostic(code(digest_corpus::registry::initialization))]
    Initialization {
        /// Registry name of the algorithm.
        algorithm: &'static str,
        /// Declared output length in bytes.
        expected: usize,
        /// Length actually produced.
        actual: usize,
    },

    /// A digest algorithm returned the wrong number of bytes for an input.
    #[error("digest algorithm {algorithm} produced {actual} bytes, expected {expected}")]
    #[diagnostic(code(digest_corpus::registry::digest_computation))]
    DigestComputation {
        /// Registry name of the algorithm.
        algorithm: &'static str,
        /// Declared output length in bytes.
        expected: usize,
        /// Length actually produced.
        actual: usize,
    },

    /// Generator parameters were rejected before any work started.
    #[error("invalid corpus configuration: {reason}")]
    #[diagnostic(code(digest_corpus::config::invalid))]
    InvalidConfig {
        /// Human-readable explanation.
        reason: String,
    },

    /// The blob output directory could not be opened.
    #[error("failed to open output directory {path}")]
    #[diagnostic(
        code(digest_corpus::io::open_output_dir),
        help("check that the directory exists and is writable")
    )]
    OpenOutputDir {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing a blob file failed.
    #[error("failed to write blob {name}")]
    #[diagnostic(code(digest_corpus::io::write_blob))]
    WriteBlob {
        /// File name of the blob inside the output directory.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading the word stream failed.
    #[error("failed to read word input")]
    #[diagnostic(code(digest_corpus::io::read_input))]
    ReadInput {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the manifest failed.
    #[error("failed to write manifest")]
    #[diagnostic(code(digest_corpus::io::write_manifest))]
    WriteManifest {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
