//! Source path / content separation for a single record

use crate::error::{Result, SchelmError};

/// One document of the stream: where it came from and what it contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spec<'a> {
    /// Relative path from the `# Source:` line, used verbatim
    pub source: &'a str,
    /// Everything after the source line, stored as is
    pub content: &'a [u8],
}

impl<'a> Spec<'a> {
    /// Split a record at its first newline.
    ///
    /// A record without any newline is taken as a bare source path with empty
    /// content. The source path is not trimmed.
    pub fn parse(record: &'a [u8]) -> Result<Self> {
        let (source, content) = match record.iter().position(|&b| b == b'\n') {
            Some(i) => (&record[..i], &record[i + 1..]),
            None => (record, &record[record.len()..]),
        };

        let source = std::str::from_utf8(source).map_err(|_| SchelmError::InvalidSourcePath {
            path: String::from_utf8_lossy(source).into_owned(),
        })?;

        Ok(Self { source, content })
    }

    /// Whether the record had no source path at all
    pub fn has_empty_source(&self) -> bool {
        self.source.is_empty()
    }
}
