//! Error conversion utilities for CLI.
//!
//! Converts unpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use unpack_core::ExtractError;

/// Converts `ExtractError` to a user-friendly anyhow error with context
pub fn convert_extract_error(err: ExtractError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractError::UnsupportedFormat { extension } => {
            anyhow!(
                "Unsupported file format '{}' for '{}'\n\
                 HINT: Supported formats: zip, tar, tar.gz, tgz, tar.bz2, tar.xz, gz, bz2, xz",
                extension,
                archive.display()
            )
        }
        ExtractError::Corrupted { path, detail } => {
            anyhow!(
                "Unable to extract '{}': {}\n\
                 HINT: The file may be corrupted or incomplete. Try re-downloading it.",
                path.display(),
                detail
            )
        }
        ExtractError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds context to a core extraction result.
pub fn add_archive_context<T>(
    result: Result<T, ExtractError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extract_error(e, archive))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_convert_unsupported_format() {
        let err = ExtractError::UnsupportedFormat {
            extension: "rar".to_string(),
        };
        let converted = convert_extract_error(err, Path::new("upload.rar"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("rar"));
        assert!(msg.contains("upload.rar"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_corrupted() {
        let err = ExtractError::Corrupted {
            path: PathBuf::from("broken.tar.gz"),
            detail: "invalid gzip header".to_string(),
        };
        let converted = convert_extract_error(err, Path::new("broken.tar.gz"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("broken.tar.gz"));
        assert!(msg.contains("invalid gzip header"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_io_error() {
        let err = ExtractError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        let converted = convert_extract_error(err, Path::new("locked.zip"));
        let msg = format!("{converted}");
        assert!(msg.contains("locked.zip"));
        assert!(msg.contains("permission denied"));
    }
}
