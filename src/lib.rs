//! flashcard-csv: convert flashcard text exports into two-column CSV
//!
//! Quizlet exports tab separated files with a `.csv` extension, and plain
//! text decks are often written as `TERM=DEFINITION` lines. Neither imports
//! cleanly into apps that expect RFC 4180 CSV. This crate rewrites both into
//! files where every line holds exactly two double-quoted fields.
//!
//! # Quick Start
//!
//! ```no_run
//! use flashcard_csv::Pipeline;
//!
//! // Rewrite every Quizlet export in a folder, in place
//! let reports = Pipeline::tab_source().run("exports/").unwrap();
//!
//! for report in &reports {
//!     println!("{report}");
//! }
//! ```
//!
//! # Safety of in-place rewrites
//!
//! Output is written to a temporary file in the destination's directory and
//! renamed over the destination only once every record has been written.
//! A failure at any point leaves the original file as it was, and a source
//! with no valid records is never replaced. Running the tab pipeline twice
//! is therefore harmless: the second run finds no tabs and reports
//! [`ConversionOutcome::Empty`].
//!
//! # Building blocks
//!
//! ```
//! use flashcard_csv::{quote, Record, SplitRule};
//!
//! let (term, definition) = SplitRule::EQUALS.split("Café=a coffee shop, \"cozy\"").unwrap();
//! assert_eq!(quote(&term), "\"Café\"");
//!
//! let record = Record::new(term, definition);
//! assert_eq!(record.to_csv_line(), "\"Café\",\"a coffee shop, \"\"cozy\"\"\"\n");
//! ```

mod batch;
mod encoding;
mod error;
mod field;
mod outcome;
mod pipeline;
mod reader;
mod record;
mod split;
mod writer;

pub use error::{ConvertError, Result};
pub use field::{quote, trim_field, unwrap_quoted};
pub use outcome::{ConversionOutcome, FileReport, SkipReason};
pub use pipeline::{OutputMode, Pipeline};
pub use reader::{RecordReader, Records};
pub use record::Record;
pub use split::{split, split_first, SplitRule};
pub use writer::{overwrite, replace_in_place, write_fresh, write_new, AtomicCsvWriter};

// Re-export for advanced usage
pub use encoding::{decode_with_fallback, text_fallback_chain, SourceEncoding};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api() {
        // Verify all public types are accessible
        let _pipeline = Pipeline::tab_source();
        let _mode = OutputMode::InPlace;
        let _rule = SplitRule::EQUALS;
        let _encoding = SourceEncoding::Utf8Sig;
        let _reason = SkipReason::WrongExtension;
    }

    #[test]
    fn test_quote_record_line() {
        let (term, definition) = SplitRule::TAB.split("hello\tworld\textra").unwrap();
        let record = Record::new(term, definition);

        assert_eq!(record.to_csv_line(), "\"hello\",\"world\textra\"\n");
    }
}
