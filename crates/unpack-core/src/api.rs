//! High-level extraction entry point.

use std::path::Path;

use crate::Result;
use crate::formats::detect::ArchiveFormat;
use crate::formats::detect::resolve_format;
use crate::formats::plain;
use crate::formats::plain::PlainOutcome;
use crate::formats::tar;
use crate::formats::zip;
use crate::report::ExtractionReport;
use crate::report::ProgressSink;
use crate::types::DestDir;

/// Extracts an archive into the destination directory.
///
/// The format is resolved from the filename. Bare compressed files (`.gz`,
/// `.bz2`, `.xz` without a `.tar` stem) are first decompressed as a single
/// stream; when the payload turns out to be a tar archive in disguise, the
/// partial output is discarded and tar extraction runs instead. Progress
/// milestones are reported through `sink` and may restart from a lower
/// percentage when that fallback happens.
///
/// # Errors
///
/// Returns [`crate::ExtractError::UnsupportedFormat`] for unrecognized
/// extensions without touching the filesystem,
/// [`crate::ExtractError::Corrupted`] when no decode mode can read the
/// archive, and [`crate::ExtractError::Io`] for filesystem failures.
pub fn extract_archive(
    source: &Path,
    dest: &DestDir,
    sink: &mut dyn ProgressSink,
) -> Result<ExtractionReport> {
    let format = resolve_format(source)?;
    tracing::debug!(
        source = %source.display(),
        format = format.describe(),
        "resolved archive format"
    );

    let mut report = ExtractionReport::new();
    match format {
        ArchiveFormat::Zip => zip::extract_zip(source, dest, sink, &mut report)?,
        ArchiveFormat::Tar(hint) => tar::extract_tar(source, dest, hint, sink, &mut report)?,
        ArchiveFormat::PlainCompressed(codec) => {
            match plain::extract_plain(source, dest, codec, sink, &mut report)? {
                PlainOutcome::Extracted { .. } => {}
                PlainOutcome::NotCompressed { detail } => {
                    tracing::info!(
                        source = %source.display(),
                        detail,
                        "plain decompression rejected the stream, retrying as tar"
                    );
                    tar::extract_tar(source, dest, Some(codec), sink, &mut report)?;
                }
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ExtractError;
    use crate::report::NoopSink;
    use crate::test_utils;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::ZipTestBuilder;
    use tempfile::TempDir;

    #[test]
    fn test_dispatches_zip() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("bundle.zip");
        std::fs::write(&source, ZipTestBuilder::new().add_file("a.txt", b"zip").build()).unwrap();

        let dest = DestDir::create(temp.path().join("out")).unwrap();
        let report = extract_archive(&source, &dest, &mut NoopSink).unwrap();
        assert_eq!(report.entries_extracted, 1);
        assert_eq!(std::fs::read(dest.join(Path::new("a.txt"))).unwrap(), b"zip");
    }

    #[test]
    fn test_unsupported_extension_before_any_io() {
        let temp = TempDir::new().unwrap();
        // File deliberately absent: resolution must fail before open.
        let source = temp.path().join("payload.rar");

        let dest = DestDir::create(temp.path().join("out")).unwrap();
        let err = extract_archive(&source, &dest, &mut NoopSink).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_gz_named_tarball_falls_back_to_tar() {
        let temp = TempDir::new().unwrap();
        // A .gz whose decompressed payload is a tar stream.
        let tar_data = TarTestBuilder::new()
            .add_file("inner/data.txt", b"tar payload")
            .build();
        let source = temp.path().join("upload.gz");
        std::fs::write(&source, test_utils::gzip_compress(&tar_data)).unwrap();

        let dest = DestDir::create(temp.path().join("out")).unwrap();
        let report = extract_archive(&source, &dest, &mut NoopSink).unwrap();

        assert_eq!(
            std::fs::read(dest.join(Path::new("inner/data.txt"))).unwrap(),
            b"tar payload"
        );
        // No leftover from the abandoned plain attempt.
        assert!(!dest.join(Path::new("upload")).exists());
        assert_eq!(report.entries_extracted, 1);
    }

    #[test]
    fn test_plain_gz_stays_plain() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("notes.txt.gz");
        std::fs::write(&source, test_utils::gzip_compress(b"just text")).unwrap();

        let dest = DestDir::create(temp.path().join("out")).unwrap();
        let report = extract_archive(&source, &dest, &mut NoopSink).unwrap();

        assert_eq!(
            std::fs::read(dest.join(Path::new("notes.txt"))).unwrap(),
            b"just text"
        );
        assert_eq!(report.entries_extracted, 1);
    }
}
