//! Splitting source lines into a term and a definition.

use crate::field::trim_field;

/// How a source line is divided into term and definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    /// Split on every occurrence of `delimiter`; everything after the first
    /// segment is joined back with the delimiter to form the definition.
    /// Lines with fewer than `min_parts` segments are skipped. Fields are
    /// left untrimmed.
    Rejoin {
        /// Field delimiter.
        delimiter: char,
        /// Minimum number of segments for a line to be accepted.
        min_parts: usize,
    },
    /// Split at the first occurrence of `delimiter` only. The line and both
    /// halves are trimmed of surrounding whitespace.
    FirstOccurrence {
        /// Field delimiter.
        delimiter: char,
    },
}

impl SplitRule {
    /// Quizlet export rule: tab separated, extra tabs kept in the definition.
    pub const TAB: SplitRule = SplitRule::Rejoin {
        delimiter: '\t',
        min_parts: 2,
    };

    /// Plain-text rule: `TERM=DEFINITION`, only the first `=` counts.
    pub const EQUALS: SplitRule = SplitRule::FirstOccurrence { delimiter: '=' };

    /// The delimiter character this rule splits on.
    pub fn delimiter(&self) -> char {
        match *self {
            SplitRule::Rejoin { delimiter, .. } | SplitRule::FirstOccurrence { delimiter } => {
                delimiter
            }
        }
    }

    /// Split one line. Returns `None` when the line should be skipped.
    pub fn split(&self, line: &str) -> Option<(String, String)> {
        match *self {
            SplitRule::Rejoin {
                delimiter,
                min_parts,
            } => split(line, delimiter, min_parts),
            SplitRule::FirstOccurrence { delimiter } => split_first(line, delimiter),
        }
    }
}

impl Default for SplitRule {
    fn default() -> Self {
        SplitRule::TAB
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// Split `line` on every `delimiter`, rejoining the tail into the definition.
///
/// ```
/// use flashcard_csv::split;
///
/// assert_eq!(
///     split("a\tb\tc", '\t', 2),
///     Some(("a".to_string(), "b\tc".to_string()))
/// );
/// assert_eq!(split("noTabHere", '\t', 2), None);
/// assert_eq!(split("", '\t', 2), None);
/// ```
pub fn split(line: &str, delimiter: char, min_parts: usize) -> Option<(String, String)> {
    let line = strip_line_ending(line);
    if line.is_empty() {
        return None;
    }

    // Segment count is occurrences + 1
    if line.matches(delimiter).count() + 1 < min_parts {
        return None;
    }

    let (term, definition) = line.split_once(delimiter).unwrap_or((line, ""));
    Some((term.to_string(), definition.to_string()))
}

/// Split `line` at the first `delimiter`, trimming both halves.
pub fn split_first(line: &str, delimiter: char) -> Option<(String, String)> {
    let line = trim_field(strip_line_ending(line));
    if line.is_empty() {
        return None;
    }

    let (term, definition) = line.split_once(delimiter)?;
    Some((
        trim_field(term).to_string(),
        trim_field(definition).to_string(),
    ))
}

/// Take the first line of `text`, returning it without its terminator
/// along with the number of bytes consumed including the terminator.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line, and a trailing
/// terminator does not produce a final empty line.
pub(crate) fn next_line(text: &str) -> Option<(&str, usize)> {
    if text.is_empty() {
        return None;
    }

    match text.find(['\r', '\n']) {
        Some(pos) if text[pos..].starts_with("\r\n") => Some((&text[..pos], pos + 2)),
        Some(pos) => Some((&text[..pos], pos + 1)),
        None => Some((text, text.len())),
    }
}
