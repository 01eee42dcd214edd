//! Bare single-stream decompression (gzip/bzip2/xz without tar structure).

use std::fs::File;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionReport;
use crate::ProgressSink;
use crate::Result;
use crate::types::DestDir;

use super::compression::CompressionCodec;

/// Result of attempting to treat an input as a plain compressed stream.
///
/// The tri-state makes the plain-vs-tar ambiguity a visible branch: a bare
/// `.gz` that is really a renamed `.tar.gz` fails plain decompression with a
/// stream-format error, which is a signal to reinterpret the file as a
/// compressed tar, not a failure of the run. Hard failures (filesystem
/// errors) surface as `Err` and do not trigger reinterpretation.
#[derive(Debug)]
pub enum PlainOutcome {
    /// The stream decompressed cleanly to a single output file.
    Extracted {
        /// Where the decompressed bytes were written.
        output_path: PathBuf,
        /// Decompressed size in bytes.
        bytes: u64,
    },
    /// The input should be reinterpreted as a tar archive: either the
    /// decoder rejected the stream outright, or it decompressed cleanly but
    /// the payload starts with a tar header block (a renamed `.tar.gz`).
    NotCompressed {
        /// The diagnostic, kept for corruption reporting.
        detail: String,
    },
}

/// Decompresses a single-stream compressed file into the destination.
///
/// The output filename is the source filename with the trailing codec
/// extension removed, or `<name>.decompressed` when the suffix does not
/// match. Partial output from a failed attempt is always removed so a later
/// tar interpretation never sees leaked files.
pub fn extract_plain(
    source: &Path,
    dest: &DestDir,
    codec: CompressionCodec,
    sink: &mut dyn ProgressSink,
    report: &mut ExtractionReport,
) -> Result<PlainOutcome> {
    sink.milestone(10, &format!("Decompressing {} file...", codec.name()));

    let output_name = output_filename(source, codec);
    let output_path = dest.join(Path::new(&output_name));

    let input = File::open(source)?;
    let mut decoder = codec.decoder(input);

    sink.milestone(30, "Decompressing file...");

    // Peek one tar block before touching the output. A renamed `.tar.gz`
    // decompresses cleanly, so a decode error alone cannot catch it; the
    // payload itself has to be inspected.
    let mut head = [0u8; TAR_BLOCK];
    let head_len = match read_head(&mut decoder, &mut head) {
        Ok(n) => n,
        Err(e) if is_stream_format_error(&e) => {
            tracing::debug!(
                source = %source.display(),
                codec = codec.name(),
                error = %e,
                "not a plain compressed stream"
            );
            return Ok(PlainOutcome::NotCompressed {
                detail: e.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    if looks_like_tar(&head[..head_len]) {
        tracing::debug!(
            source = %source.display(),
            codec = codec.name(),
            "decompressed payload carries a tar header"
        );
        return Ok(PlainOutcome::NotCompressed {
            detail: "decompressed payload is a tar stream".to_string(),
        });
    }

    let output = File::create(&output_path)?;
    let mut writer = BufWriter::new(output);

    let bytes = match writer
        .write_all(&head[..head_len])
        .and_then(|()| std::io::copy(&mut decoder, &mut writer))
        .and_then(|n| {
            writer.flush()?;
            Ok(n + head_len as u64)
        }) {
        Ok(n) => n,
        Err(e) => {
            drop(writer);
            remove_partial(&output_path);
            if is_stream_format_error(&e) {
                tracing::debug!(
                    source = %source.display(),
                    codec = codec.name(),
                    error = %e,
                    "not a plain compressed stream"
                );
                return Ok(PlainOutcome::NotCompressed {
                    detail: e.to_string(),
                });
            }
            return Err(e.into());
        }
    };

    report.entries_extracted += 1;
    report.bytes_written += bytes;

    sink.milestone(90, &format!("Decompressed to {output_name} ({bytes} bytes)"));
    tracing::info!(
        source = %source.display(),
        output = %output_path.display(),
        bytes,
        "decompressed plain stream"
    );

    Ok(PlainOutcome::Extracted { output_path, bytes })
}

const TAR_BLOCK: usize = 512;
const TAR_MAGIC_OFFSET: usize = 257;

/// Reads up to one tar block, tolerating payloads shorter than a block.
fn read_head(reader: &mut dyn Read, buf: &mut [u8; TAR_BLOCK]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Both POSIX ("ustar\0") and GNU ("ustar ") archives carry "ustar" at
/// offset 257 of the first header block.
fn looks_like_tar(head: &[u8]) -> bool {
    head.get(TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + 5) == Some(b"ustar")
}

/// Derives the output filename by stripping the codec extension.
fn output_filename(source: &Path, codec: CompressionCodec) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{}", codec.extension());

    name.strip_suffix(&suffix).map_or_else(
        || format!("{name}.decompressed"),
        std::string::ToString::to_string,
    )
}

/// Errors that mean "this is not a valid stream of this codec", as opposed
/// to filesystem failures. `Other` is included because the bzip2 and xz
/// decoders surface stream errors under it.
fn is_stream_format_error(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof
    ) || e.kind() == ErrorKind::Other
}

fn remove_partial(path: &Path) {
    if let Err(e) = std::fs::remove_file(path)
        && e.kind() != ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove partial output");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::report::NoopSink;
    use tempfile::TempDir;

    fn gzip_bytes(data: &[u8]) -> Vec<u8> {
        let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_output_filename_strips_codec_suffix() {
        assert_eq!(
            output_filename(Path::new("console.log.gz"), CompressionCodec::Gzip),
            "console.log"
        );
        assert_eq!(
            output_filename(Path::new("dump.bz2"), CompressionCodec::Bzip2),
            "dump"
        );
    }

    #[test]
    fn test_output_filename_mismatched_suffix() {
        // Resolver saw a gz candidate but the filename tail is unusual.
        assert_eq!(
            output_filename(Path::new("data.gzip"), CompressionCodec::Gzip),
            "data.gzip.decompressed"
        );
    }

    #[test]
    fn test_extract_plain_gzip() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.gz");
        std::fs::write(&source, gzip_bytes(b"hello plain stream")).unwrap();

        let out_dir = temp.path().join("out");
        let dest = DestDir::create(&out_dir).unwrap();
        let mut report = ExtractionReport::new();

        let outcome = extract_plain(
            &source,
            &dest,
            CompressionCodec::Gzip,
            &mut NoopSink,
            &mut report,
        )
        .unwrap();

        match outcome {
            PlainOutcome::Extracted { output_path, bytes } => {
                assert_eq!(output_path, out_dir.canonicalize().unwrap().join("data"));
                assert_eq!(bytes, 18);
                assert_eq!(std::fs::read(&output_path).unwrap(), b"hello plain stream");
            }
            PlainOutcome::NotCompressed { detail } => {
                panic!("expected extraction, got NotCompressed: {detail}")
            }
        }
        assert_eq!(report.entries_extracted, 1);
    }

    #[test]
    fn test_extract_plain_rejects_tar_payload() {
        // A tar stream has no gzip magic; the decoder errors on the header
        // and the attempt reports NotCompressed with no partial output left.
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("payload.gz");
        std::fs::write(&source, b"ustar not actually gzip").unwrap();

        let out_dir = temp.path().join("out");
        let dest = DestDir::create(&out_dir).unwrap();
        let mut report = ExtractionReport::new();

        let outcome = extract_plain(
            &source,
            &dest,
            CompressionCodec::Gzip,
            &mut NoopSink,
            &mut report,
        )
        .unwrap();

        assert!(matches!(outcome, PlainOutcome::NotCompressed { .. }));
        assert!(!out_dir.join("payload").exists());
        assert_eq!(report.entries_extracted, 0);
    }

    #[test]
    fn test_valid_gzip_of_tar_stream_reports_not_compressed() {
        // Renamed .tar.gz: gzip decodes fine, the payload gives it away.
        let temp = TempDir::new().unwrap();
        let tar_data = crate::test_utils::TarTestBuilder::new()
            .add_file("inner.txt", b"tar member")
            .build();
        let source = temp.path().join("payload.gz");
        std::fs::write(&source, gzip_bytes(&tar_data)).unwrap();

        let out_dir = temp.path().join("out");
        let dest = DestDir::create(&out_dir).unwrap();
        let mut report = ExtractionReport::new();

        let outcome = extract_plain(
            &source,
            &dest,
            CompressionCodec::Gzip,
            &mut NoopSink,
            &mut report,
        )
        .unwrap();

        assert!(matches!(outcome, PlainOutcome::NotCompressed { .. }));
        assert!(!out_dir.join("payload").exists());
        assert_eq!(report.entries_extracted, 0);
    }

    #[test]
    fn test_short_text_payload_extracts() {
        // Shorter than one tar block, must still extract normally.
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("note.gz");
        std::fs::write(&source, gzip_bytes(b"tiny")).unwrap();

        let out_dir = temp.path().join("out");
        let dest = DestDir::create(&out_dir).unwrap();
        let mut report = ExtractionReport::new();

        let outcome = extract_plain(
            &source,
            &dest,
            CompressionCodec::Gzip,
            &mut NoopSink,
            &mut report,
        )
        .unwrap();

        assert!(matches!(outcome, PlainOutcome::Extracted { bytes: 4, .. }));
    }

    #[test]
    fn test_truncated_gzip_reports_not_compressed() {
        let temp = TempDir::new().unwrap();
        let mut bytes = gzip_bytes(b"some longer content that compresses into several bytes");
        bytes.truncate(bytes.len() / 2);
        let source = temp.path().join("cut.gz");
        std::fs::write(&source, bytes).unwrap();

        let out_dir = temp.path().join("out");
        let dest = DestDir::create(&out_dir).unwrap();
        let mut report = ExtractionReport::new();

        let outcome = extract_plain(
            &source,
            &dest,
            CompressionCodec::Gzip,
            &mut NoopSink,
            &mut report,
        )
        .unwrap();

        assert!(matches!(outcome, PlainOutcome::NotCompressed { .. }));
        assert!(!out_dir.join("cut").exists(), "partial output must be removed");
    }
}
