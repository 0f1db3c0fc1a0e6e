//! Deterministic digest fixture corpora.
//!
//! This library generates test fixtures for hash implementations: seeded
//! pseudorandom blobs or whitespace-delimited words, each paired with its
//! SHA-1 and SHA-2 family digests in a tab-separated manifest.

pub mod algorithm;
pub mod blobs;
pub mod cli;
pub mod error;
pub mod manifest;
pub mod rng;
pub mod runner;
pub mod words;

pub use error::CorpusError;
