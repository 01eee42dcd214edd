//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::MilestoneBar;
use anyhow::Context;
use anyhow::Result;
use std::env;
use unpack_core::extract_archive;
use unpack_core::report::NoopSink;
use unpack_core::types::DestDir;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let dest = add_archive_context(DestDir::create(&output_dir), &args.archive)?;
    tracing::debug!(
        archive = %args.archive.display(),
        output_dir = %dest.as_path().display(),
        "starting extraction"
    );

    // Use progress bar if TTY is detected (not quiet, not JSON)
    let report = if MilestoneBar::should_show() && !quiet {
        let mut bar = MilestoneBar::new("Extracting");
        add_archive_context(extract_archive(&args.archive, &dest, &mut bar), &args.archive)?
    } else {
        add_archive_context(
            extract_archive(&args.archive, &dest, &mut NoopSink),
            &args.archive,
        )?
    };

    tracing::debug!(
        entries = report.entries_extracted,
        skipped = report.members_skipped,
        bytes = report.bytes_written,
        "extraction finished"
    );

    let dest_path = dest.into_path_buf();
    formatter.format_extraction_result(&dest_path, &report)?;

    Ok(())
}
