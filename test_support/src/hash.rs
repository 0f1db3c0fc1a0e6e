//! Hash helpers for tests.
//!
//! These utilities expose a SHA-256 encoding that does not go through the
//! digest registry, so integration tests can cross-check manifest columns.
//!
//! # Examples
//!
//! ```rust
//! use test_support::hash::sha256_hex;
//!
//! let digest = sha256_hex(b"");
//! assert!(digest.starts_with("e3b0c442"));
//! ```
use sha2::{Digest, Sha256};

/// Published digests of the empty input, in manifest column order.
pub const EMPTY_DIGESTS: [(&str, &str); 7] = [
    ("SHA1", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
    (
        "SHA256",
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    ),
    (
        "SHA224",
        "d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f",
    ),
    (
        "SHA512",
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
         47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
    ),
    (
        "SHA384",
        "38b060a751ac96384cd9327eb1b1e36a21fdb71114be0743\
         4c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b",
    ),
    (
        "SHA512/224",
        "6ed0dd02806fa89e25de060c19d3ac86cabb87d6a0ddd05c333b84f4",
    ),
    (
        "SHA512/256",
        "c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a",
    ),
];

/// Compute the SHA-256 digest for `data` and return it as a lowercase hex
/// string.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut key = String::with_capacity(digest.len() * 2);
    for byte in digest {
        use std::fmt::Write;
        let _ = write!(&mut key, "{byte:02x}");
    }
    key
}
