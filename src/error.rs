use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for flashcard conversion operations.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// IO error while reading the source or writing the temporary file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// None of the configured encodings could decode the source.
    #[error("Could not decode {} with any of: {tried}", .path.display())]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// Comma-separated names of the encodings that were tried.
        tried: String,
    },

    /// The finished temporary file could not be moved over the destination.
    #[error("Could not replace {}: {source}", .path.display())]
    Persist {
        /// The destination that was left untouched.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target is neither a regular file nor a directory.
    #[error("\"{}\" is not a valid file or directory", .0.display())]
    InvalidTarget(PathBuf),
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
