//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use unpack_core::ArchiveFormat;
use unpack_core::ExtractionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(
        &self,
        output_dir: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Extraction complete");
        }

        let _ = self
            .term
            .write_line(&format!("  Entries extracted: {}", report.entries_extracted));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));
        let _ = self
            .term
            .write_line(&format!("  Output directory: {}", output_dir.display()));

        if report.members_skipped > 0 {
            let line = format!("  Members skipped: {}", report.members_skipped);
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style(line).yellow()));
            } else {
                let _ = self.term.write_line(&line);
            }
        }

        if self.verbose {
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  warning: {warning}"));
            }
        }

        Ok(())
    }

    fn format_resolve_result(&self, file: &Path, format: ArchiveFormat) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        let _ = self
            .term
            .write_line(&format!("{}: {}", file.display(), format.describe()));
        Ok(())
    }
}
