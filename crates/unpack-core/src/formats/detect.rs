//! Archive format resolution from filenames.
//!
//! Resolution is extension-driven and never reads file content; the one
//! ambiguous case (a bare `.gz`/`.bz2`/`.xz` name that may be a renamed
//! compressed tar) is resolved later by the engine's try-plain-then-tar
//! branch, not here.

use std::path::Path;

use crate::ExtractError;
use crate::Result;

use super::compression::CompressionCodec;

/// Resolved classification of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// ZIP archive.
    Zip,
    /// Tar archive, optionally wrapped in a compression codec.
    Tar(Option<CompressionCodec>),
    /// Bare single compressed stream with no container structure.
    ///
    /// This is a candidate classification: if plain decompression reports a
    /// stream-format error, the engine reclassifies the input as
    /// `Tar(Some(codec))` and retries.
    PlainCompressed(CompressionCodec),
}

impl ArchiveFormat {
    /// Human-readable label for progress messages.
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            Self::Zip => "ZIP archive".to_string(),
            Self::Tar(None) => "TAR archive".to_string(),
            Self::Tar(Some(codec)) => format!("TAR archive ({})", codec.name()),
            Self::PlainCompressed(codec) => format!("{} file", codec.name()),
        }
    }
}

/// Resolves the container format of a file from its name.
///
/// Rules, in order:
/// 1. `.zip` → [`ArchiveFormat::Zip`]
/// 2. `.tar` → uncompressed tar, `.tgz` → gzip tar
/// 3. a bare codec extension (`.gz`/`.bz2`/`.xz`): if the name ends in
///    `.tar.<codec>` it is a compressed tar, otherwise a plain-compressed
///    candidate
/// 4. any other extension on a stem containing `tar` → tar, codec unknown
///    (the open ladder will try every mode)
///
/// # Errors
///
/// Returns [`ExtractError::UnsupportedFormat`] carrying the rejected
/// extension for anything else.
pub fn resolve_format(path: &Path) -> Result<ArchiveFormat> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if name.ends_with(".zip") {
        return Ok(ArchiveFormat::Zip);
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "tar" => Ok(ArchiveFormat::Tar(None)),
        "tgz" => Ok(ArchiveFormat::Tar(Some(CompressionCodec::Gzip))),
        "gz" | "bz2" | "xz" => {
            // from_extension cannot fail for these three arms
            let codec = CompressionCodec::from_extension(&extension).ok_or_else(|| {
                ExtractError::UnsupportedFormat {
                    extension: extension.clone(),
                }
            })?;
            if name.ends_with(&format!(".tar.{extension}")) {
                Ok(ArchiveFormat::Tar(Some(codec)))
            } else {
                Ok(ArchiveFormat::PlainCompressed(codec))
            }
        }
        _ => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default();
            if stem.contains("tar") {
                Ok(ArchiveFormat::Tar(CompressionCodec::from_extension(
                    &extension,
                )))
            } else {
                Err(ExtractError::UnsupportedFormat { extension })
            }
        }
    }
}
