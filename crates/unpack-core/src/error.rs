//! Error types for archive extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting an archive.
///
/// Structural failures are terminal for a run. The plain-compressed-vs-tar
/// ambiguity is deliberately NOT represented here: it is a visible branch in
/// the engine (see [`crate::formats::plain::PlainOutcome`]), not an error.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension is not in the supported set.
    ///
    /// Carries the rejected extension verbatim so callers can surface it to
    /// the user. No content sniffing is attempted for unknown extensions.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The rejected extension (may be empty for extension-less names).
        extension: String,
    },

    /// Every attempted decode mode failed.
    #[error(
        "unable to extract {path}: the file may be corrupted, incomplete, \
         or not a valid archive (last error: {detail})"
    )]
    Corrupted {
        /// The archive that could not be decoded.
        path: PathBuf,
        /// The last underlying decode error.
        detail: String,
    },
}

impl ExtractError {
    /// Returns `true` if the error was detected before any bytes were
    /// written to the destination.
    ///
    /// Unsupported formats are rejected purely from the filename, so a job
    /// can move straight from `queued` to `error` without an extraction
    /// phase.
    #[must_use]
    pub const fn is_preflight(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}
