//! Atomic CSV writer with automatic cleanup on failure.
//!
//! Writes quoted two-field lines to a temporary file in the same directory
//! as the destination, then atomically replaces the destination on
//! `finish()`. If dropped before finishing, the temporary file is removed.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};
use crate::outcome::ConversionOutcome;
use crate::record::Record;

/// An atomic writer for two-column flashcard CSV.
pub struct AtomicCsvWriter {
    writer: BufWriter<NamedTempFile>,
    final_path: PathBuf,
    written: usize,
}

impl AtomicCsvWriter {
    /// Creates a new atomic writer targeting `final_path`.
    ///
    /// The temporary file is created in the same directory as `final_path`
    /// so the final rename never crosses a filesystem boundary.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::Io` if the parent directory cannot be
    /// determined or the temporary file cannot be created.
    pub fn new(final_path: impl AsRef<Path>) -> Result<Self> {
        Self::create(final_path.as_ref(), None)
    }

    /// Creates an atomic writer for a destination that does not exist yet.
    ///
    /// The temporary file is opened with the mode a plain `File::create`
    /// would give it (`0o666` less the process umask on Unix) instead of the
    /// owner-only mode temporary files normally get.
    pub fn for_new_file(final_path: impl AsRef<Path>) -> Result<Self> {
        Self::create(final_path.as_ref(), default_file_permissions())
    }

    fn create(final_path: &Path, permissions: Option<fs::Permissions>) -> Result<Self> {
        let final_path = final_path.to_path_buf();

        let parent_dir = match final_path.parent() {
            Some(dir) if dir.as_os_str().is_empty() => Path::new("."),
            Some(dir) => dir,
            None => {
                return Err(ConvertError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "Cannot determine parent directory for: {}",
                        final_path.display()
                    ),
                )));
            }
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".flashcard-").suffix(".tmp");
        if let Some(permissions) = permissions {
            builder.permissions(permissions);
        }
        let temp_file = builder.tempfile_in(parent_dir)?;

        Ok(Self {
            writer: BufWriter::new(temp_file),
            final_path,
            written: 0,
        })
    }

    /// Append one record as a quoted line.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.writer.write_all(record.to_csv_line().as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Path of the temporary file backing this writer.
    pub fn temp_path(&self) -> &Path {
        self.writer.get_ref().path()
    }

    /// Give the temporary file the same permissions as `path`, so an
    /// in-place replacement keeps the original mode.
    pub fn copy_permissions_from(&mut self, path: &Path) -> Result<()> {
        let permissions = fs::metadata(path)?.permissions();
        self.writer.get_ref().as_file().set_permissions(permissions)?;
        Ok(())
    }

    /// Flushes, syncs and atomically moves the file over the final path.
    ///
    /// Returns the number of records written. On error the temporary file
    /// is removed and the destination is left as it was.
    pub fn finish(self) -> Result<usize> {
        let written = self.written;
        let final_path = self.final_path;

        let named_temp = self.writer.into_inner().map_err(|e| e.into_error())?;
        named_temp.as_file().sync_all()?;

        named_temp
            .persist(&final_path)
            .map_err(|e| ConvertError::Persist {
                path: final_path.clone(),
                source: e.error,
            })?;

        Ok(written)
    }

    /// Drop everything written and remove the temporary file.
    pub fn discard(self) -> Result<()> {
        let (named_temp, _unflushed) = self.writer.into_parts();
        named_temp.close()?;
        Ok(())
    }
}

fn write_records<I>(writer: &mut AtomicCsvWriter, records: I) -> Result<()>
where
    I: IntoIterator<Item = Result<Record>>,
{
    for record in records {
        writer.write_record(&record?)?;
    }
    Ok(())
}

/// Rewrite `path` in place from `records`.
///
/// Returns the number of records committed. When there are none the
/// temporary file is discarded and `path` is not touched, so a return of
/// zero means nothing changed.
pub fn replace_in_place<I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut writer = AtomicCsvWriter::new(path)?;
    writer.copy_permissions_from(path)?;

    // Temp file is removed on drop if anything below fails
    write_records(&mut writer, records)?;

    if writer.written() == 0 {
        writer.discard()?;
        return Ok(0);
    }
    writer.finish()
}

/// Write `records` to `out_path`, creating parent directories as needed.
///
/// The same temp-and-rename discipline as [`replace_in_place`] is used, but
/// the file is written even when there are no records.
pub fn write_fresh<I>(records: I, out_path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = Result<Record>>,
{
    match out_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
        _ => {}
    }

    // An existing output keeps its mode, a new one gets the usual default
    let mut writer = if out_path.exists() {
        let mut writer = AtomicCsvWriter::new(out_path)?;
        writer.copy_permissions_from(out_path)?;
        writer
    } else {
        AtomicCsvWriter::for_new_file(out_path)?
    };
    write_records(&mut writer, records)?;
    writer.finish()
}

#[cfg(unix)]
fn default_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    // The umask is applied when the file is opened
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn default_file_permissions() -> Option<fs::Permissions> {
    None
}

/// In-place conversion of one file, as an outcome value.
pub fn overwrite<I>(path: &Path, records: I) -> ConversionOutcome
where
    I: IntoIterator<Item = Result<Record>>,
{
    match replace_in_place(path, records) {
        Ok(0) => ConversionOutcome::Empty,
        Ok(n) => ConversionOutcome::Converted(n),
        Err(e) => ConversionOutcome::Failed(e),
    }
}

/// Fresh-output conversion, as an outcome value.
pub fn write_new<I>(records: I, out_path: &Path) -> ConversionOutcome
where
    I: IntoIterator<Item = Result<Record>>,
{
    match write_fresh(records, out_path) {
        Ok(n) => ConversionOutcome::Converted(n),
        Err(e) => ConversionOutcome::Failed(e),
    }
}
