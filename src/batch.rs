//! Batch orchestration: pick up source files, convert each one, and collect
//! a report per file. A failing file never stops the batch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::outcome::{ConversionOutcome, FileReport, SkipReason};
use crate::pipeline::{OutputMode, Pipeline};
use crate::record::Record;
use crate::writer::{overwrite, write_new};

impl Pipeline {
    /// Convert a single file or every matching file directly inside a
    /// directory.
    ///
    /// Files are processed one at a time in file-name order. Every per-file
    /// problem is returned as a report; the only error is a target that is
    /// neither a file nor a directory.
    pub fn run<P: AsRef<Path>>(&self, target: P) -> Result<Vec<FileReport>> {
        let target = target.as_ref();

        let sources = if target.is_file() {
            if !self.matches_extension(target) {
                tracing::debug!("Skipping {}: wrong extension", target.display());
                return Ok(vec![FileReport::new(
                    target,
                    None,
                    ConversionOutcome::Skipped(SkipReason::WrongExtension),
                )]);
            }
            vec![target.to_path_buf()]
        } else if target.is_dir() {
            match self.matching_files(target) {
                Ok(files) if files.is_empty() => {
                    tracing::warn!(
                        "No .{} files found in directory: {}",
                        self.source_extension(),
                        target.display()
                    );
                    return Ok(vec![FileReport::new(
                        target,
                        None,
                        ConversionOutcome::Skipped(SkipReason::NoMatchingFiles),
                    )]);
                }
                Ok(files) => {
                    tracing::info!(
                        "Scanning {} file{} in directory: {}",
                        files.len(),
                        if files.len() == 1 { "" } else { "s" },
                        target.display()
                    );
                    files
                }
                Err(e) => {
                    return Ok(vec![FileReport::new(
                        target,
                        None,
                        ConversionOutcome::Failed(e),
                    )]);
                }
            }
        } else {
            return Err(ConvertError::InvalidTarget(target.to_path_buf()));
        };

        let reports = match self.output() {
            OutputMode::Combined(out) => self.convert_combined(&sources, target, out),
            _ => sources.iter().map(|source| self.convert_file(source)).collect(),
        };
        Ok(reports)
    }

    /// Convert one source file to its per-file destination.
    pub fn convert_file(&self, source: &Path) -> FileReport {
        let destination = self.destination_for(source);

        let mut records = match self.reader().read_path(source) {
            Ok(records) => records,
            Err(e) => {
                return FileReport::new(source, Some(destination), ConversionOutcome::Failed(e));
            }
        };

        let outcome = if destination == source {
            overwrite(source, records.by_ref().map(Ok))
        } else {
            write_new(records.by_ref().map(Ok), &destination)
        };

        match &outcome {
            ConversionOutcome::Empty => {
                tracing::debug!("No valid records in {}, left unchanged", source.display())
            }
            ConversionOutcome::Failed(e) => {
                tracing::debug!("Conversion of {} failed: {e}", source.display())
            }
            _ => tracing::debug!(
                "Converted {} -> {} ({} lines skipped)",
                source.display(),
                destination.display(),
                records.skipped_lines()
            ),
        }

        FileReport::new(source, Some(destination), outcome)
            .with_skipped_lines(records.skipped_lines())
    }

    /// Read every source, then write all records to `out` in one go.
    fn convert_combined(&self, sources: &[PathBuf], target: &Path, out: &Path) -> Vec<FileReport> {
        let reader = self.reader();
        let mut reports = Vec::with_capacity(sources.len() + 1);
        let mut all: Vec<Record> = Vec::new();
        let mut skipped_total = 0;

        for source in sources {
            match reader.read_path(source) {
                Ok(mut records) => {
                    let before = all.len();
                    all.extend(records.by_ref());
                    skipped_total += records.skipped_lines();
                    reports.push(
                        FileReport::new(
                            source,
                            Some(out.to_path_buf()),
                            ConversionOutcome::Read(all.len() - before),
                        )
                        .with_skipped_lines(records.skipped_lines()),
                    );
                }
                Err(e) => {
                    tracing::debug!("Leaving {} out of {}: {e}", source.display(), out.display());
                    reports.push(FileReport::new(source, None, ConversionOutcome::Failed(e)));
                }
            }
        }

        let outcome = write_new(all.into_iter().map(Ok), out);
        reports.push(
            FileReport::new(target, Some(out.to_path_buf()), outcome)
                .with_skipped_lines(skipped_total),
        );
        reports
    }

    /// Regular files directly inside `dir` with the source extension, sorted.
    fn matching_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && self.matches_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
