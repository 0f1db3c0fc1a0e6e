//! Whitespace-delimited word corpus.
//!
//! Words are read lazily from any [`Read`] source and digested one at a
//! time. Word length is unbounded: the accumulation buffer grows as needed.

use std::io::{self, BufReader, Bytes, Read};

use tracing::debug;

use crate::algorithm::AlgorithmRegistry;
use crate::error::CorpusError;
use crate::manifest::ManifestRow;

/// Whitespace as classified by C's `isspace` in the "C" locale.
#[must_use]
pub const fn is_word_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Iterator over the words of a byte stream.
///
/// # Examples
///
/// ```
/// use digest_corpus::words::Words;
///
/// let words: Vec<Vec<u8>> = Words::new(&b"abc  def\tghi\n"[..]).collect::<Result<_, _>>()?;
/// assert_eq!(words, [b"abc".to_vec(), b"def".to_vec(), b"ghi".to_vec()]);
/// # Ok::<(), digest_corpus::CorpusError>(())
/// ```
#[derive(Debug)]
pub struct Words<R> {
    bytes: Bytes<BufReader<R>>,
    done: bool,
}

impl<R: Read> Words<R> {
    /// Tokenise `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            done: false,
        }
    }

    fn next_byte(&mut self) -> Option<io::Result<u8>> {
        if self.done {
            return None;
        }
        let byte = self.bytes.next();
        if matches!(byte, None | Some(Err(_))) {
            self.done = true;
        }
        byte
    }
}

impl<R: Read> Iterator for Words<R> {
    type Item = Result<Vec<u8>, CorpusError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut word = Vec::new();
        while let Some(byte) = self.next_byte() {
            match byte {
                Ok(b) if is_word_separator(b) => {
                    if !word.is_empty() {
                        return Some(Ok(word));
                    }
                }
                Ok(b) => word.push(b),
                Err(source) => return Some(Err(CorpusError::ReadInput { source })),
            }
        }
        (!word.is_empty()).then_some(Ok(word))
    }
}

impl<R: Read> std::iter::FusedIterator for Words<R> {}

/// Digests every word of an input stream.
#[derive(Debug, Clone, Copy)]
pub struct WordCorpusProcessor<'a> {
    registry: &'a AlgorithmRegistry,
}

impl<'a> WordCorpusProcessor<'a> {
    /// Create a processor over `registry`.
    #[must_use]
    pub const fn new(registry: &'a AlgorithmRegistry) -> Self {
        Self { registry }
    }

    /// Yield one manifest row per word in `reader`, identified by the word.
    pub fn process<R: Read>(
        &self,
        reader: R,
    ) -> impl Iterator<Item = Result<ManifestRow, CorpusError>> + use<'a, R> {
        let registry = self.registry;
        Words::new(reader).map(move |token| {
            let word = token?;
            debug!(len = word.len(), "digesting word");
            let digests = registry.digest_all(&word)?;
            Ok(ManifestRow {
                identifier: word,
                digests,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::{Result, ensure};
    use rstest::rstest;

    #[rstest]
    #[case(b' ', true)]
    #[case(b'\t', true)]
    #[case(b'\n', true)]
    #[case(b'\r', true)]
    #[case(0x0b, true)]
    #[case(0x0c, true)]
    #[case(b'a', false)]
    #[case(0x00, false)]
    #[case(0x85, false)]
    #[case(0xa0, false)]
    fn separators_match_c_locale(#[case] byte: u8, #[case] expected: bool) {
        assert_eq!(is_word_separator(byte), expected);
    }

    #[rstest]
    #[case("", &[])]
    #[case(" \t\n ", &[])]
    #[case("abc  def\tghi\n", &["abc", "def", "ghi"])]
    #[case("\n\nlast", &["last"])]
    #[case("\x0bvt\x0cff\r\ncrlf", &["vt", "ff", "crlf"])]
    fn splits_on_whitespace_runs(#[case] input: &str, #[case] expected: &[&str]) -> Result<()> {
        let words = Words::new(input.as_bytes()).collect::<Result<Vec<_>, _>>()?;
        let wanted: Vec<Vec<u8>> = expected.iter().map(|w| w.as_bytes().to_vec()).collect();
        ensure!(words == wanted, "got {words:?}");
        Ok(())
    }

    #[test]
    fn rows_digest_the_word_itself() -> Result<()> {
        let registry = AlgorithmRegistry::standard()?;
        let rows = WordCorpusProcessor::new(&registry)
            .process(&b"adam iggy"[..])
            .collect::<Result<Vec<_>, _>>()?;
        ensure!(rows.len() == 2, "expected two rows");
        for row in &rows {
            ensure!(
                row.digests == registry.digest_all(&row.identifier)?,
                "digests must cover the word bytes"
            );
        }
        Ok(())
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stream broke"))
        }
    }

    #[test]
    fn read_errors_end_the_stream() {
        let mut words = Words::new(BrokenReader);
        assert!(matches!(words.next(), Some(Err(CorpusError::ReadInput { .. }))));
        assert!(words.next().is_none());
    }
}
