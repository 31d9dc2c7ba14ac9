//! Pipeline configuration: which files to pick up, how to split and decode
//! them, and where the converted CSV goes.

use std::path::{Path, PathBuf};

use crate::encoding::{text_fallback_chain, SourceEncoding};
use crate::reader::RecordReader;
use crate::split::SplitRule;

/// Where converted output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Replace each source file.
    InPlace,
    /// Next to each source, same stem with a `.csv` extension.
    BesideSource,
    /// Into the given directory, same stem with a `.csv` extension.
    Directory(PathBuf),
    /// All records from every source into one file.
    Combined(PathBuf),
}

/// A configured conversion pipeline.
///
/// # Example
///
/// ```no_run
/// use flashcard_csv::{OutputMode, Pipeline};
///
/// let mut pipeline = Pipeline::equals_source();
/// pipeline.output_mode(OutputMode::Combined("all_cards.csv".into()));
///
/// for report in pipeline.run("decks/").unwrap() {
///     println!("{report}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Source file extension, without the dot, matched case-insensitively.
    extension: String,
    /// How lines are split into term and definition.
    split_rule: SplitRule,
    /// Encodings tried in order when decoding a source.
    encodings: Vec<SourceEncoding>,
    /// Output destination.
    output: OutputMode,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::tab_source()
    }
}

impl Pipeline {
    /// Quizlet exports: tab separated `.csv` files rewritten in place, UTF-8 only.
    pub fn tab_source() -> Self {
        Self {
            extension: "csv".to_string(),
            split_rule: SplitRule::TAB,
            encodings: vec![SourceEncoding::Utf8],
            output: OutputMode::InPlace,
        }
    }

    /// Plain-text `TERM=DEFINITION` `.txt` files, written beside the source.
    pub fn equals_source() -> Self {
        Self {
            extension: "txt".to_string(),
            split_rule: SplitRule::EQUALS,
            encodings: text_fallback_chain(),
            output: OutputMode::BesideSource,
        }
    }

    /// Set the source extension (without the leading dot).
    pub fn extension(&mut self, extension: impl Into<String>) -> &mut Self {
        self.extension = extension.into();
        self
    }

    /// Set the line split rule.
    pub fn split_rule(&mut self, split_rule: SplitRule) -> &mut Self {
        self.split_rule = split_rule;
        self
    }

    /// Set the encoding fallback chain.
    pub fn encodings(&mut self, encodings: Vec<SourceEncoding>) -> &mut Self {
        self.encodings = encodings;
        self
    }

    /// Set the output mode.
    pub fn output_mode(&mut self, output: OutputMode) -> &mut Self {
        self.output = output;
        self
    }

    pub fn source_extension(&self) -> &str {
        &self.extension
    }

    pub fn output(&self) -> &OutputMode {
        &self.output
    }

    /// A reader configured with this pipeline's split rule and encodings.
    pub fn reader(&self) -> RecordReader {
        RecordReader::new(self.split_rule, self.encodings.clone())
    }

    /// True if `path` has the source extension.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Per-file destination for `source`. In combined mode this is the
    /// combined file.
    pub fn destination_for(&self, source: &Path) -> PathBuf {
        match &self.output {
            OutputMode::InPlace => source.to_path_buf(),
            OutputMode::BesideSource => source.with_extension("csv"),
            OutputMode::Directory(dir) => {
                let mut name = source.file_stem().unwrap_or(source.as_os_str()).to_os_string();
                name.push(".csv");
                dir.join(name)
            }
            OutputMode::Combined(path) => path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let tab = Pipeline::tab_source();
        assert_eq!(tab.source_extension(), "csv");
        assert_eq!(tab.output(), &OutputMode::InPlace);

        let eq = Pipeline::equals_source();
        assert_eq!(eq.source_extension(), "txt");
        assert_eq!(eq.output(), &OutputMode::BesideSource);
    }

    #[test]
    fn test_builder_pattern() {
        let mut pipeline = Pipeline::equals_source();
        pipeline
            .extension("tsv")
            .split_rule(SplitRule::TAB)
            .encodings(vec![SourceEncoding::Utf8])
            .output_mode(OutputMode::Directory("out".into()));

        assert_eq!(pipeline.source_extension(), "tsv");
        assert_eq!(pipeline.split_rule, SplitRule::TAB);
        assert_eq!(pipeline.encodings, vec![SourceEncoding::Utf8]);
    }

    #[test]
    fn test_matches_extension() {
        let pipeline = Pipeline::tab_source();
        assert!(pipeline.matches_extension(Path::new("deck.csv")));
        assert!(pipeline.matches_extension(Path::new("DECK.CSV")));
        assert!(!pipeline.matches_extension(Path::new("deck.txt")));
        assert!(!pipeline.matches_extension(Path::new("deck")));
    }

    #[test]
    fn test_destination_for() {
        let source = Path::new("decks/spanish.txt");
        let mut pipeline = Pipeline::equals_source();
        assert_eq!(
            pipeline.destination_for(source),
            PathBuf::from("decks/spanish.csv")
        );

        pipeline.output_mode(OutputMode::Directory("out".into()));
        assert_eq!(
            pipeline.destination_for(source),
            PathBuf::from("out/spanish.csv")
        );
        assert_eq!(
            pipeline.destination_for(Path::new("my.deck.txt")),
            PathBuf::from("out/my.deck.csv")
        );

        pipeline.output_mode(OutputMode::Combined("all.csv".into()));
        assert_eq!(pipeline.destination_for(source), PathBuf::from("all.csv"));

        assert_eq!(
            Pipeline::tab_source().destination_for(Path::new("a/b.csv")),
            PathBuf::from("a/b.csv")
        );
    }
}
