//! Command line interface definitions using clap.
//!
//! [`BlobsCli`] backs the `gen-blobs` binary and [`WordsCli`] backs
//! `gen-words`. Run without flags, both reproduce the reference fixture
//! generators exactly.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::blobs::{BlobCorpusConfig, DEFAULT_COUNT, DEFAULT_MAX_LENGTH, DEFAULT_SEED};

fn parse_max_length(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("{s} is not a valid number"))?;
    if value == 0 {
        Err("max length must be at least 1".into())
    } else {
        Ok(value)
    }
}

/// Generate the seeded blob corpus and print its digest manifest.
#[derive(Debug, Parser)]
#[command(name = "gen-blobs", author, version, about, long_about = None)]
pub struct BlobsCli {
    /// Directory that receives the `blob<N>.bin` files.
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: Utf8PathBuf,

    /// Seed for the pseudorandom blob content.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SEED)]
    pub seed: u32,

    /// Number of blobs to generate.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Exclusive upper bound on blob length in bytes.
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_LENGTH,
        value_parser = parse_max_length
    )]
    pub max_length: usize,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BlobsCli {
    /// Generator configuration selected by the flags.
    #[must_use]
    pub const fn corpus_config(&self) -> BlobCorpusConfig {
        BlobCorpusConfig {
            seed: self.seed,
            count: self.count,
            max_length: self.max_length,
        }
    }
}

/// Read words from standard input and print their digest manifest.
#[derive(Debug, Parser)]
#[command(name = "gen-words", author, version, about, long_about = None)]
pub struct WordsCli {
    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::{Result, ensure};
    use clap::error::ErrorKind;
    use rstest::rstest;

    #[test]
    fn blobs_defaults_match_reference() -> Result<()> {
        let cli = BlobsCli::try_parse_from(["gen-blobs"])?;
        ensure!(cli.output_dir == Utf8PathBuf::from("."), "default dir is cwd");
        ensure!(
            cli.corpus_config() == BlobCorpusConfig::default(),
            "defaults should match the reference corpus"
        );
        ensure!(!cli.verbose, "verbose is off by default");
        Ok(())
    }

    #[test]
    fn blobs_accepts_overrides() -> Result<()> {
        let cli = BlobsCli::try_parse_from([
            "gen-blobs", "out", "--seed", "7", "--count", "3", "--max-length", "16", "-v",
        ])?;
        ensure!(cli.output_dir == Utf8PathBuf::from("out"), "positional output dir");
        ensure!(
            cli.corpus_config()
                == BlobCorpusConfig {
                    seed: 7,
                    count: 3,
                    max_length: 16,
                },
            "flags should override the defaults"
        );
        ensure!(cli.verbose, "-v enables verbose output");
        Ok(())
    }

    #[rstest]
    #[case(&["gen-blobs", "--max-length", "0"], ErrorKind::ValueValidation)]
    #[case(&["gen-blobs", "--seed", "seven"], ErrorKind::ValueValidation)]
    #[case(&["gen-blobs", "a", "b"], ErrorKind::UnknownArgument)]
    fn blobs_rejects_bad_arguments(#[case] argv: &[&str], #[case] kind: ErrorKind) {
        let err = BlobsCli::try_parse_from(argv).expect_err("arguments should be rejected");
        assert_eq!(err.kind(), kind);
    }

    #[test]
    fn words_takes_no_positional_arguments() {
        assert!(WordsCli::try_parse_from(["gen-words", "file.txt"]).is_err());
    }
}
