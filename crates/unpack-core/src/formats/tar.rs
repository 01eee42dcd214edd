//! Tar extraction with compression auto-detection and per-member filtering.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::ExtractError;
use crate::ExtractionReport;
use crate::ProgressSink;
use crate::Result;
use crate::filter::MemberDecision;
use crate::filter::MemberKind;
use crate::filter::screen_member;
use crate::types::DestDir;

use super::common;
use super::compression::CompressionCodec;

/// Extracts a tar archive, compressed or not, to the destination.
///
/// The compression mode is auto-detected from the file's magic bytes first.
/// If that mode fails to read, explicit modes derived from the extension
/// hint are retried in priority order (a `.gz` name tries gzip, then
/// uncompressed), accumulating the last error. Once a mode survives the full
/// counting pass it is committed to; every member of the extraction pass
/// then goes through the safety filter.
pub fn extract_tar(
    source: &Path,
    dest: &DestDir,
    hint: Option<CompressionCodec>,
    sink: &mut dyn ProgressSink,
    report: &mut ExtractionReport,
) -> Result<()> {
    sink.milestone(10, "Extracting TAR archive...");

    // Surface open failures (missing file, permissions) before the mode
    // ladder, which only retries stream-format problems.
    let mut probe = File::open(source)?;
    let sniffed = CompressionCodec::sniff(&mut probe)?;
    drop(probe);

    let mut last_error: Option<String> = None;
    for mode in mode_candidates(sniffed, hint) {
        match count_members(source, mode) {
            Ok(total) => {
                sink.milestone(50, &format!("Extracting {total} files..."));
                extract_members(source, dest, mode, report)?;
                sink.milestone(90, &format!("Extracted {total} files"));
                tracing::info!(
                    source = %source.display(),
                    members = total,
                    mode = mode.map_or("none", CompressionCodec::name),
                    "extracted tar archive"
                );
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(
                    source = %source.display(),
                    mode = mode.map_or("none", CompressionCodec::name),
                    error = %e,
                    "tar open mode failed, trying next"
                );
                last_error = Some(e.to_string());
            }
        }
    }

    Err(ExtractError::Corrupted {
        path: source.to_path_buf(),
        detail: last_error.unwrap_or_else(|| "no decode mode available".to_string()),
    })
}

/// Decode modes to try, best guess first, without duplicates.
fn mode_candidates(
    sniffed: Option<CompressionCodec>,
    hint: Option<CompressionCodec>,
) -> Vec<Option<CompressionCodec>> {
    let mut candidates = vec![sniffed];

    let ladder: &[Option<CompressionCodec>] = match hint {
        Some(codec) => &[Some(codec), None],
        None => &[
            None,
            Some(CompressionCodec::Gzip),
            Some(CompressionCodec::Bzip2),
            Some(CompressionCodec::Xz),
        ],
    };
    for mode in ladder {
        if !candidates.contains(mode) {
            candidates.push(*mode);
        }
    }
    candidates
}

fn open_archive(
    source: &Path,
    mode: Option<CompressionCodec>,
) -> std::io::Result<tar::Archive<Box<dyn Read>>> {
    let file = File::open(source)?;
    let reader: Box<dyn Read> = match mode {
        Some(codec) => codec.decoder(file),
        None => Box::new(file),
    };
    Ok(tar::Archive::new(reader))
}

/// Reads the full member list, validating the whole stream for this mode.
fn count_members(source: &Path, mode: Option<CompressionCodec>) -> std::io::Result<usize> {
    let mut archive = open_archive(source, mode)?;
    let mut total = 0;
    for entry in archive.entries()? {
        entry?;
        total += 1;
    }
    Ok(total)
}

/// Second pass: extract every member through the safety filter.
fn extract_members(
    source: &Path,
    dest: &DestDir,
    mode: Option<CompressionCodec>,
    report: &mut ExtractionReport,
) -> Result<()> {
    let mut archive = open_archive(source, mode)?;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let kind = member_kind(&entry.header().entry_type());
        let member_path = entry.path()?.into_owned();
        let link_target = entry.link_name()?.map(std::borrow::Cow::into_owned);

        match screen_member(kind, &member_path, link_target.as_deref()) {
            MemberDecision::PassThrough => {
                let size = entry.size();
                match entry.unpack_in(dest.as_path()) {
                    Ok(true) => {
                        report.entries_extracted += 1;
                        if kind == MemberKind::File {
                            report.bytes_written += size;
                        }
                    }
                    Ok(false) => {
                        // The tar library refused the member as unsafe.
                        report.members_skipped += 1;
                    }
                    // A link target that cannot be resolved (absent, or
                    // refused by the tar library) fails at link time; the
                    // member is dropped and the run continues, matching
                    // the rewrite path's policy.
                    Err(e) if matches!(kind, MemberKind::Symlink | MemberKind::HardLink) => {
                        tracing::warn!(
                            source = %source.display(),
                            member = %member_path.display(),
                            error = %e,
                            "skipped unresolvable link member"
                        );
                        report.members_skipped += 1;
                        report.add_warning(format!("{}: {e}", member_path.display()));
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            MemberDecision::Rewrite { path, link_target } => {
                let output = dest.join(&path);
                match kind {
                    MemberKind::File => {
                        common::write_file(&mut entry, &output, report)?;
                    }
                    MemberKind::Directory => {
                        common::create_directory(&output, report)?;
                    }
                    MemberKind::Symlink => match link_target {
                        Some(target) => common::create_symlink(&output, &target, report)?,
                        None => report.members_skipped += 1,
                    },
                    MemberKind::HardLink => match link_target {
                        Some(target) => {
                            common::create_hardlink(&output, &dest.join(&target), report)?;
                        }
                        None => report.members_skipped += 1,
                    },
                    MemberKind::Special => unreachable!("special members are always skipped"),
                }
            }
            MemberDecision::Skip { reason } => {
                tracing::warn!(
                    source = %source.display(),
                    member = %member_path.display(),
                    reason,
                    "skipped archive member"
                );
                report.members_skipped += 1;
                report.add_warning(format!("{}: {reason}", member_path.display()));
            }
        }
    }

    Ok(())
}

fn member_kind(entry_type: &tar::EntryType) -> MemberKind {
    if entry_type.is_character_special() || entry_type.is_block_special() || entry_type.is_fifo()
    {
        MemberKind::Special
    } else if entry_type.is_dir() {
        MemberKind::Directory
    } else if entry_type.is_symlink() {
        MemberKind::Symlink
    } else if entry_type.is_hard_link() {
        MemberKind::HardLink
    } else {
        MemberKind::File
    }
}
