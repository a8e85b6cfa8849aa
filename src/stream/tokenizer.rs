//! Incremental delimiter tokenizer
//!
//! [`Tokenizer`] turns any reader into a lazy sequence of records separated by
//! [`DELIMITER`]. Only the unread tail of the stream is buffered, and the buffer
//! never grows past the configured record size plus one delimiter and one read
//! chunk, so a stream of arbitrary length is split in bounded memory.
//!
//! The sequence is finite and fused: after the final record, or after the first
//! error, every call to `next` returns `None`.

use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

use super::DELIMITER;
use crate::error::{Result, SchelmError};

/// Bytes requested from the reader per fill
const READ_CHUNK: usize = 64 * 1024;

/// Pull-based splitter over a byte stream
pub struct Tokenizer<R> {
    reader: R,
    chunk: Box<[u8]>,
    buf: Vec<u8>,
    /// Start of the unread bytes in `buf`
    pos: usize,
    /// Number of unread bytes already ruled out as a delimiter start
    scanned: usize,
    max_record_size: usize,
    boundaries: usize,
    eof: bool,
    finished: bool,
}

impl<R: Read> Tokenizer<R> {
    /// Create a tokenizer with the default 1 MiB record limit
    #[cfg(test)]
    pub fn new(reader: R) -> Self {
        Self::with_max_record_size(reader, super::DEFAULT_MAX_SPEC_SIZE)
    }

    /// Create a tokenizer that fails on any record longer than `max_record_size` bytes
    pub fn with_max_record_size(reader: R, max_record_size: usize) -> Self {
        Self {
            reader,
            chunk: vec![0; READ_CHUNK].into_boxed_slice(),
            buf: Vec::new(),
            pos: 0,
            scanned: 0,
            max_record_size,
            boundaries: 0,
            eof: false,
            finished: false,
        }
    }

    /// Number of delimiters consumed so far
    pub fn boundaries(&self) -> usize {
        self.boundaries
    }

    fn advance(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            let unread_len = self.buf.len() - self.pos;
            let search_from = self.pos + self.scanned;

            if let Some(offset) = find(&self.buf[search_from..], DELIMITER) {
                let end = self.scanned + offset;
                if end > self.max_record_size {
                    return Err(self.too_large());
                }
                let record = self.buf[self.pos..self.pos + end].to_vec();
                self.pos += end + DELIMITER.len();
                self.scanned = 0;
                self.boundaries += 1;
                return Ok(Some(record));
            }

            // A delimiter can still start in the last few bytes once more input arrives
            self.scanned = unread_len.saturating_sub(DELIMITER.len() - 1);

            if self.eof {
                if unread_len == 0 {
                    return Ok(None);
                }
                if unread_len > self.max_record_size {
                    return Err(self.too_large());
                }
                let record = self.buf[self.pos..].to_vec();
                self.pos = self.buf.len();
                self.scanned = 0;
                return Ok(Some(record));
            }

            if unread_len > self.max_record_size.saturating_add(DELIMITER.len() - 1) {
                return Err(self.too_large());
            }

            if self.fill()? == 0 {
                self.eof = true;
            }
        }
    }

    /// Read one chunk into the buffer, dropping already consumed bytes first
    fn fill(&mut self) -> Result<usize> {
        if self.pos > 0 {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }

        loop {
            match self.reader.read(&mut self.chunk) {
                Ok(n) => {
                    self.buf.extend_from_slice(&self.chunk[..n]);
                    return Ok(n);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(SchelmError::InputReadFailed {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    fn too_large(&self) -> SchelmError {
        SchelmError::SpecTooLarge {
            limit: self.max_record_size,
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.advance() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for Tokenizer<R> {}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    /// Reader that hands out at most `chunk` bytes per call
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
            let n = self.chunk.min(out.len()).min(self.data.len());
            out[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Reader that yields some bytes, is interrupted once, then fails
    struct Flaky {
        calls: usize,
    }

    impl Read for Flaky {
        fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
            self.calls += 1;
            match self.calls {
                1 => {
                    out[..4].copy_from_slice(b"pre\n");
                    Ok(4)
                }
                2 => Err(std::io::Error::new(ErrorKind::Interrupted, "signal")),
                _ => Err(std::io::Error::other("device gone")),
            }
        }
    }

    fn collect(input: &[u8]) -> Vec<Vec<u8>> {
        Tokenizer::new(Cursor::new(input))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        let mut tokenizer = Tokenizer::new(std::io::empty());
        assert!(tokenizer.next().is_none());
        assert_eq!(tokenizer.boundaries(), 0);
    }

    #[test]
    fn test_no_delimiter_yields_single_record() {
        assert_eq!(collect(b"just some text\n"), vec![b"just some text\n".to_vec()]);
    }

    #[test]
    fn test_splits_at_each_delimiter() {
        let records = collect(b"pre\n---\n# Source: a.yaml\nfoo: 1\n---\n# Source: b.yaml\nbar: 2\n");
        assert_eq!(
            records,
            vec![
                b"pre\n".to_vec(),
                b"a.yaml\nfoo: 1\n".to_vec(),
                b"b.yaml\nbar: 2\n".to_vec(),
            ]
        );
    }

    #[test]
    fn test_leading_delimiter_yields_empty_preamble() {
        let records = collect(b"---\n# Source: a.yaml\nx\n");
        assert_eq!(records, vec![Vec::new(), b"a.yaml\nx\n".to_vec()]);
    }

    #[test]
    fn test_trailing_delimiter_yields_no_extra_record() {
        let mut tokenizer = Tokenizer::new(Cursor::new(b"pre\n---\n# Source: ".as_slice()));
        assert_eq!(tokenizer.next().unwrap().unwrap(), b"pre\n".to_vec());
        assert!(tokenizer.next().is_none());
        assert_eq!(tokenizer.boundaries(), 1);
    }

    #[test]
    fn test_consecutive_delimiters_yield_empty_record() {
        let records = collect(b"---\n# Source: ---\n# Source: a\n");
        assert_eq!(records, vec![Vec::new(), Vec::new(), b"a\n".to_vec()]);
    }

    #[test]
    fn test_plain_document_separator_is_content() {
        let records = collect(b"---\n# Source: a\nx: 1\n---\ny: 2\n");
        assert_eq!(records, vec![Vec::new(), b"a\nx: 1\n---\ny: 2\n".to_vec()]);
    }

    #[test]
    fn test_delimiter_split_across_reads() {
        let input = b"preamble\n---\n# Source: a.yaml\nfoo: 1\n---\n# Source: b/c.yaml\nbar: 2\n";
        for chunk in 1..=7 {
            let tokenizer = Tokenizer::new(Trickle {
                data: input,
                chunk,
            });
            let records = tokenizer.collect::<Result<Vec<_>>>().unwrap();
            assert_eq!(
                records,
                vec![
                    b"preamble\n".to_vec(),
                    b"a.yaml\nfoo: 1\n".to_vec(),
                    b"b/c.yaml\nbar: 2\n".to_vec(),
                ],
                "chunk size {chunk}"
            );
        }
    }

    #[test]
    fn test_record_at_limit_is_accepted() {
        let mut input = b"---\n# Source: ".to_vec();
        input.extend(std::iter::repeat_n(b'x', 16));
        let records = Tokenizer::with_max_record_size(Cursor::new(input), 16)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(records[1].len(), 16);
    }

    #[test]
    fn test_record_over_limit_fails() {
        let mut input = b"---\n# Source: a\n".to_vec();
        input.extend(std::iter::repeat_n(b'x', 64));
        input.extend_from_slice(b"---\n# Source: b\n");
        let mut tokenizer = Tokenizer::with_max_record_size(
            Trickle {
                data: &input,
                chunk: 5,
            },
            16,
        );
        assert!(tokenizer.next().unwrap().is_ok());
        let err = tokenizer.next().unwrap().unwrap_err();
        assert!(matches!(err, SchelmError::SpecTooLarge { limit: 16 }));
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_unterminated_record_over_limit_fails() {
        let input = vec![b'y'; 100];
        let err = Tokenizer::with_max_record_size(Cursor::new(input), 10)
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, SchelmError::SpecTooLarge { limit: 10 }));
    }

    #[test]
    fn test_read_error_is_surfaced_once() {
        let mut tokenizer = Tokenizer::new(Flaky { calls: 0 });
        let err = tokenizer.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("device gone"));
        assert!(tokenizer.next().is_none());
    }

    proptest! {
        #[test]
        fn prop_joined_records_are_recovered(
            records in prop::collection::vec("[a-z#:/ \\n-]{0,24}", 1..8),
            chunk in 1usize..32,
        ) {
            let delimiter = String::from_utf8(DELIMITER.to_vec()).unwrap();
            prop_assume!(records.iter().all(|r| !r.contains(&delimiter)));

            let input = records.join(delimiter.as_str());
            let tokenizer = Tokenizer::new(Trickle { data: input.as_bytes(), chunk });
            let got = tokenizer.collect::<Result<Vec<_>>>().unwrap();

            // A trailing empty record is indistinguishable from end of stream
            let mut expected: Vec<Vec<u8>> = records.iter().map(|r| r.as_bytes().to_vec()).collect();
            if expected.len() > 1 && expected.last().is_some_and(Vec::is_empty) {
                expected.pop();
            }
            if expected.len() == 1 && expected[0].is_empty() {
                expected.clear();
            }
            prop_assert_eq!(got, expected);
        }
    }
}
