use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Why an input was not converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A single-file target does not have the pipeline's source extension.
    WrongExtension,
    /// A directory target holds no file with the source extension.
    NoMatchingFiles,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::WrongExtension => write!(f, "wrong extension"),
            SkipReason::NoMatchingFiles => write!(f, "no matching files"),
        }
    }
}

/// Result of converting one file (or of the single write in combined mode).
#[derive(Debug)]
pub enum ConversionOutcome {
    /// The destination now holds this many cards.
    Converted(usize),
    /// Combined mode only: this many cards were collected from the source
    /// for the shared write.
    Read(usize),
    /// The input was not processed.
    Skipped(SkipReason),
    /// In-place mode found no valid records; the source is unchanged.
    Empty,
    /// Reading or writing failed; the destination is unchanged.
    Failed(ConvertError),
}

impl ConversionOutcome {
    /// Returns true for `Failed`.
    pub fn is_failure(&self) -> bool {
        matches!(self, ConversionOutcome::Failed(_))
    }

    /// Number of cards converted or read, if any were.
    pub fn count(&self) -> Option<usize> {
        match self {
            ConversionOutcome::Converted(n) | ConversionOutcome::Read(n) => Some(*n),
            _ => None,
        }
    }
}

/// Per-file report produced by a batch run.
#[derive(Debug)]
pub struct FileReport {
    /// Source file, or the target directory for batch-level reports.
    pub source: PathBuf,
    /// Where output was (or would have been) written.
    pub destination: Option<PathBuf>,
    /// What happened.
    pub outcome: ConversionOutcome,
    /// Source lines that were blank or malformed and silently dropped.
    pub skipped_lines: usize,
}

impl FileReport {
    /// Create a new FileReport with no skipped lines.
    pub fn new(
        source: impl Into<PathBuf>,
        destination: Option<PathBuf>,
        outcome: ConversionOutcome,
    ) -> Self {
        Self {
            source: source.into(),
            destination,
            outcome,
            skipped_lines: 0,
        }
    }

    /// Set the skipped line count.
    pub fn with_skipped_lines(mut self, skipped_lines: usize) -> Self {
        self.skipped_lines = skipped_lines;
        self
    }

    /// True when the destination is the source itself.
    pub fn is_in_place(&self) -> bool {
        self.destination.as_deref() == Some(self.source.as_path())
    }

    fn source_name(&self) -> String {
        display_name(&self.source)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// One status line for the console.
impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ConversionOutcome::Converted(n) if self.is_in_place() => {
                write!(f, "✔ Overwrote {} ({n} line{})", self.source_name(), plural(*n))
            }
            ConversionOutcome::Converted(n) => match &self.destination {
                Some(dest) => write!(f, "✔ Wrote {n} card{} -> {}", plural(*n), dest.display()),
                None => write!(f, "✔ Converted {} ({n} card{})", self.source_name(), plural(*n)),
            },
            ConversionOutcome::Read(n) => {
                write!(f, "  Read {n:4} card{} from {}", plural(*n), self.source_name())
            }
            ConversionOutcome::Skipped(SkipReason::NoMatchingFiles) => {
                write!(f, "⚠ Skipping {}: no matching files", self.source.display())
            }
            ConversionOutcome::Skipped(reason) => {
                write!(f, "✖ Skipping {}: {reason}", self.source_name())
            }
            ConversionOutcome::Empty => {
                write!(f, "⚠ No valid records in {}, left unchanged", self.source_name())
            }
            ConversionOutcome::Failed(err) => {
                write!(f, "✖ Failed {}: {err}", self.source_name())
            }
        }
    }
}
