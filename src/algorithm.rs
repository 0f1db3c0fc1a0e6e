//! Digest algorithm registry.
//!
//! The registry is an ordered list of [`AlgorithmDescriptor`] values. Its
//! order defines the column order of every manifest, so reordering it is a
//! breaking format change.
//!
//! # Examples
//!
//! ```
//! use digest_corpus::algorithm::AlgorithmRegistry;
//!
//! let registry = AlgorithmRegistry::standard()?;
//! let sha256 = registry.find("sha256").ok_or("missing SHA256")?;
//! let digest = sha256.compute_digest(b"")?;
//! assert_eq!(digest.len(), 32);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use digest::Digest;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use crate::error::CorpusError;

/// Plain function computing a digest over a byte slice.
pub type DigestFn = fn(&[u8]) -> Vec<u8>;

/// Describes one supported digest algorithm.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmDescriptor {
    /// Column name used in manifests (for example `SHA512/256`).
    pub name: &'static str,
    /// Function producing the digest bytes.
    pub digest_fn: DigestFn,
    /// Expected output length in bytes.
    pub digest_length: usize,
}

impl AlgorithmDescriptor {
    /// Describe the algorithm implemented by the hasher `H`.
    #[must_use]
    pub fn of<H: Digest>(name: &'static str) -> Self {
        Self {
            name,
            digest_fn: digest_bytes::<H>,
            digest_length: <H as Digest>::output_size(),
        }
    }

    /// Compute the digest of `data` under this algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::DigestComputation`] if the output length does
    /// not match `digest_length`.
    pub fn compute_digest(&self, data: &[u8]) -> Result<Vec<u8>, CorpusError> {
        let bytes = (self.digest_fn)(data);
        if bytes.len() == self.digest_length {
            Ok(bytes)
        } else {
            Err(CorpusError::DigestComputation {
                algorithm: self.name,
                expected: self.digest_length,
                actual: bytes.len(),
            })
        }
    }
}

fn digest_bytes<H: Digest>(data: &[u8]) -> Vec<u8> {
    H::digest(data).to_vec()
}

/// A digest produced by one registry algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmDigest {
    /// Name of the algorithm that produced `bytes`.
    pub algorithm: &'static str,
    /// Raw digest bytes.
    pub bytes: Vec<u8>,
}

/// Ordered, validated collection of digest algorithms.
#[derive(Debug, Clone)]
pub struct AlgorithmRegistry {
    descriptors: Vec<AlgorithmDescriptor>,
}

impl AlgorithmRegistry {
    /// Build the standard registry: SHA1, SHA256, SHA224, SHA512, SHA384,
    /// SHA512/224 and SHA512/256, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Initialization`] if any algorithm fails its
    /// self-check.
    pub fn standard() -> Result<Self, CorpusError> {
        Self::from_descriptors(vec![
            AlgorithmDescriptor::of::<Sha1>("SHA1"),
            AlgorithmDescriptor::of::<Sha256>("SHA256"),
            AlgorithmDescriptor::of::<Sha224>("SHA224"),
            AlgorithmDescriptor::of::<Sha512>("SHA512"),
            AlgorithmDescriptor::of::<Sha384>("SHA384"),
            AlgorithmDescriptor::of::<Sha512_224>("SHA512/224"),
            AlgorithmDescriptor::of::<Sha512_256>("SHA512/256"),
        ])
    }

    /// Build a registry from explicit descriptors, keeping their order.
    ///
    /// Each descriptor digests the empty input once; a digest whose length
    /// differs from the declared `digest_length` aborts construction.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Initialization`] naming the first descriptor
    /// whose output length does not match its declaration.
    pub fn from_descriptors(descriptors: Vec<AlgorithmDescriptor>) -> Result<Self, CorpusError> {
        for descriptor in &descriptors {
            let actual = (descriptor.digest_fn)(&[]).len();
            if actual != descriptor.digest_length {
                return Err(CorpusError::Initialization {
                    algorithm: descriptor.name,
                    expected: descriptor.digest_length,
                    actual,
                });
            }
        }
        Ok(Self { descriptors })
    }

    /// Digest `data` under every algorithm, in registry order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`CorpusError::DigestComputation`].
    pub fn digest_all(&self, data: &[u8]) -> Result<Vec<AlgorithmDigest>, CorpusError> {
        self.descriptors
            .iter()
            .map(|descriptor| {
                Ok(AlgorithmDigest {
                    algorithm: descriptor.name,
                    bytes: descriptor.compute_digest(data)?,
                })
            })
            .collect()
    }

    /// Look up a descriptor by name, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
    }

    /// Iterate over descriptors in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.descriptors.iter()
    }

    /// Iterate over algorithm names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(|descriptor| descriptor.name)
    }

    /// Number of registered algorithms.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the registry holds no algorithms.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
