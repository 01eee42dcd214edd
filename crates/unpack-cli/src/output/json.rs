//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use unpack_core::ArchiveFormat;
use unpack_core::ExtractionReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(
        &self,
        output_dir: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            output_dir: String,
            entries_extracted: usize,
            members_skipped: usize,
            bytes_written: u64,
            warnings: Vec<String>,
        }

        let data = ExtractionOutput {
            output_dir: output_dir.display().to_string(),
            entries_extracted: report.entries_extracted,
            members_skipped: report.members_skipped,
            bytes_written: report.bytes_written,
            warnings: report.warnings.clone(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_resolve_result(&self, file: &Path, format: ArchiveFormat) -> Result<()> {
        #[derive(Serialize)]
        struct ResolveOutput {
            file: String,
            format: String,
        }

        let data = ResolveOutput {
            file: file.display().to_string(),
            format: format.describe(),
        };

        let output = JsonOutput::success("resolve", data);
        Self::output(&output)
    }
}
