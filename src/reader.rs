//! Reading flashcard records from delimited source files.

use std::fs;
use std::path::Path;

use crate::encoding::{decode_with_fallback, SourceEncoding};
use crate::error::Result;
use crate::record::Record;
use crate::split::{next_line, SplitRule};

/// Reads source files into [`Record`]s with a fixed split rule and encoding
/// fallback chain.
#[derive(Debug, Clone)]
pub struct RecordReader {
    split_rule: SplitRule,
    encodings: Vec<SourceEncoding>,
}

impl RecordReader {
    /// Create a reader. `encodings` are tried in order.
    pub fn new(split_rule: SplitRule, encodings: Vec<SourceEncoding>) -> Self {
        Self {
            split_rule,
            encodings,
        }
    }

    /// Read and decode the file at `path`.
    ///
    /// The file handle is closed before this returns; records are then
    /// produced lazily from the decoded text.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Records> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        self.read_bytes(&data, path)
    }

    /// Decode raw bytes. `path` labels decode errors.
    pub fn read_bytes(&self, data: &[u8], path: &Path) -> Result<Records> {
        let (text, encoding) = decode_with_fallback(data, &self.encodings, path)?;
        tracing::debug!(
            "Decoded {} as {} ({} bytes)",
            path.display(),
            encoding.name(),
            data.len()
        );

        Ok(Records {
            text,
            pos: 0,
            split_rule: self.split_rule,
            encoding,
            skipped: 0,
        })
    }
}

/// Single-pass iterator over the records of one decoded source file.
///
/// Blank and malformed lines are dropped without a warning; the number
/// dropped so far is available from [`Records::skipped_lines`].
#[derive(Debug)]
pub struct Records {
    text: String,
    pos: usize,
    split_rule: SplitRule,
    encoding: SourceEncoding,
    skipped: usize,
}

impl Records {
    /// Lines dropped so far because they were blank or malformed.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    /// The encoding the source was decoded with.
    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }
}

impl Iterator for Records {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        while let Some((line, consumed)) = next_line(&self.text[self.pos..]) {
            let parsed = self.split_rule.split(line);
            self.pos += consumed;

            match parsed {
                Some(pair) => return Some(Record::from(pair)),
                None => self.skipped += 1,
            }
        }
        None
    }
}
