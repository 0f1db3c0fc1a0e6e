//! Word corpus entry point.
//!
//! Reads words from standard input and delegates to [`runner::run_words`].

use clap::Parser;
use digest_corpus::{cli::WordsCli, runner};
use std::io;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let cli = WordsCli::parse();
    let max_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::ERROR
    };
    fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();
    match runner::run_words(io::stdin().lock(), io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %runner::render_failure(&err), "word digesting failed");
            ExitCode::FAILURE
        }
    }
}
