//! Blob corpus entry point.
//!
//! Parses command-line arguments and delegates to [`runner::run_blobs`].

use clap::Parser;
use digest_corpus::{cli::BlobsCli, runner};
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = BlobsCli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();
    match runner::run_blobs(&cli, io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %runner::render_failure(&err), "blob generation failed");
            ExitCode::FAILURE
        }
    }
}
