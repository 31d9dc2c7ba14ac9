//! Source text decoding with an ordered encoding fallback chain, using
//! SIMD-accelerated simdutf8 for UTF-8 validation and `encoding_rs` for
//! legacy encodings.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::Encoding;
use simdutf8::basic::from_utf8;

use crate::error::{ConvertError, Result};

/// Check if the data starts with a UTF-8 BOM (Byte Order Mark).
///
/// The UTF-8 BOM is the byte sequence: EF BB BF
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.len() >= 3 && data[0] == 0xEF && data[1] == 0xBB && data[2] == 0xBF
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// A text encoding a source file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8 with an optional leading BOM, which is dropped.
    Utf8Sig,
    /// Strict UTF-8. A leading BOM is kept as U+FEFF.
    Utf8,
    /// A legacy 8-bit/multibyte encoding, decoded strictly.
    Legacy(&'static Encoding),
}

impl SourceEncoding {
    /// Human readable encoding name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8Sig => "utf-8-sig",
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Legacy(encoding) => encoding.name(),
        }
    }

    /// Decode the whole buffer, or return `None` if any byte sequence is
    /// malformed under this encoding.
    pub fn decode<'a>(&self, data: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            SourceEncoding::Utf8Sig => from_utf8(skip_bom(data)).ok().map(Cow::Borrowed),
            SourceEncoding::Utf8 => from_utf8(data).ok().map(Cow::Borrowed),
            SourceEncoding::Legacy(encoding) => {
                encoding.decode_without_bom_handling_and_without_replacement(data)
            }
        }
    }
}

/// Plain-text flashcard fallback chain: UTF-8 with BOM, UTF-8, then Korean
/// windows-949 (served by `encoding_rs` as EUC-KR).
pub fn text_fallback_chain() -> Vec<SourceEncoding> {
    vec![
        SourceEncoding::Utf8Sig,
        SourceEncoding::Utf8,
        SourceEncoding::Legacy(encoding_rs::EUC_KR),
    ]
}

/// Decode `data` with the first encoding in `encodings` that accepts the
/// entire buffer.
///
/// `path` is only used to label the error when every encoding fails.
pub fn decode_with_fallback(
    data: &[u8],
    encodings: &[SourceEncoding],
    path: &Path,
) -> Result<(String, SourceEncoding)> {
    for encoding in encodings {
        if let Some(text) = encoding.decode(data) {
            return Ok((text.into_owned(), *encoding));
        }
    }

    Err(ConvertError::Decode {
        path: path.to_path_buf(),
        tried: encodings
            .iter()
            .map(SourceEncoding::name)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
