//! Validated destination directory type.

use crate::ExtractError;
use crate::Result;
use std::fs::create_dir_all;
use std::path::Path;
use std::path::PathBuf;

/// A validated destination directory for an extraction run.
///
/// Construction creates the directory idempotently (a pre-existing
/// directory is not an error) and canonicalizes the path, so containment
/// checks against it are not fooled by symlinked prefixes. The central
/// safety invariant of the engine is that every byte it writes lands inside
/// this directory's subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates the destination directory if needed and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, if the path
    /// exists but is not a directory, or if it cannot be canonicalized.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        create_dir_all(path)?;

        if !path.is_dir() {
            return Err(ExtractError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("destination is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            ExtractError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize {}: {e}", path.display()),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Returns the canonical path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a destination-relative path.
    #[inline]
    #[must_use]
    pub fn join(&self, relative: &Path) -> PathBuf {
        self.0.join(relative)
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
