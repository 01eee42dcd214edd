//! Shared filesystem helpers for the format extractors.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractionReport;
use crate::Result;

/// Buffer size for file writes.
const WRITE_BUF: usize = 64 * 1024;

/// Writes one regular file from a reader, creating parent directories.
///
/// Returns the number of bytes written and updates the report.
pub fn write_file<R: Read>(
    reader: &mut R,
    output_path: &Path,
    report: &mut ExtractionReport,
) -> Result<u64> {
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    let output = File::create(output_path)?;
    let mut writer = BufWriter::with_capacity(WRITE_BUF, output);
    let bytes = std::io::copy(reader, &mut writer)?;
    writer.flush()?;

    report.entries_extracted += 1;
    report.bytes_written += bytes;
    Ok(bytes)
}

/// Creates a directory entry. Pre-existing directories are not an error.
pub fn create_directory(path: &Path, report: &mut ExtractionReport) -> Result<()> {
    create_dir_all(path)?;
    report.entries_extracted += 1;
    Ok(())
}

/// Creates a symbolic link with the given (already neutralized) target.
///
/// On non-Unix platforms the member is recorded as skipped instead; symlinks
/// cannot be emulated there.
pub fn create_symlink(
    link_path: &Path,
    target: &Path,
    report: &mut ExtractionReport,
) -> Result<()> {
    if let Some(parent) = link_path.parent() {
        create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        // Replace a stale entry left by a previous run of the same job.
        if link_path.symlink_metadata().is_ok() {
            std::fs::remove_file(link_path)?;
        }
        std::os::unix::fs::symlink(target, link_path)?;
        report.entries_extracted += 1;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        let _ = target;
        report.members_skipped += 1;
        report.add_warning(format!(
            "symlink {} skipped: unsupported on this platform",
            link_path.display()
        ));
        Ok(())
    }
}

/// Creates a hard link whose target has been rewritten relative to the
/// destination root.
///
/// A target that does not exist (it pointed outside the archive) skips the
/// member with a warning rather than failing the run.
pub fn create_hardlink(
    link_path: &Path,
    target: &Path,
    report: &mut ExtractionReport,
) -> Result<()> {
    if let Some(parent) = link_path.parent() {
        create_dir_all(parent)?;
    }

    if target.exists() {
        std::fs::hard_link(target, link_path)?;
        report.entries_extracted += 1;
    } else {
        report.members_skipped += 1;
        report.add_warning(format!(
            "hardlink {} skipped: target {} not present in destination",
            link_path.display(),
            target.display()
        ));
    }
    Ok(())
}
