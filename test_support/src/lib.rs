//! Test utilities for the corpus generators.
//!
//! Provides an independent SHA-256 oracle, the well-known empty-input
//! digests, and a parser for generated manifests.

pub mod hash;
pub mod manifest;

pub use hash::{EMPTY_DIGESTS, sha256_hex};
pub use manifest::{ParsedManifest, parse_manifest};
