//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use unpack_core::resolve_format;

pub fn execute(args: &ResolveArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let format = add_archive_context(resolve_format(&args.file), &args.file)?;
    tracing::debug!(file = %args.file.display(), ?format, "resolved archive format");
    formatter.format_resolve_result(&args.file, format)?;
    Ok(())
}
