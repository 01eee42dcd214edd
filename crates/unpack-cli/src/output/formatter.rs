//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use unpack_core::ArchiveFormat;
use unpack_core::ExtractionReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, output_dir: &Path, report: &ExtractionReport)
    -> Result<()>;

    /// Format format-resolution result
    fn format_resolve_result(&self, file: &Path, format: ArchiveFormat) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    #[allow(dead_code)]
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}
