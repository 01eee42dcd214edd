//! Extraction run reporting and progress milestones.

/// Outcome statistics for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of entries written (files, directories, links).
    pub entries_extracted: usize,

    /// Total bytes of file content written to disk.
    pub bytes_written: u64,

    /// Number of members neutralized away by the safety filter.
    pub members_skipped: usize,

    /// Warnings generated during extraction.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Sink for coarse progress milestones emitted during a run.
///
/// The engine reports at fixed milestones (start / member count known /
/// bulk write done) rather than per entry; multi-gigabyte archives with
/// hundreds of thousands of members would otherwise drown the sink.
/// Implementations must be cheap and must not fail — a sink that needs to
/// persist updates is expected to swallow its own errors.
///
/// Milestone percentages are engine-chosen and may restart from a low value
/// when the engine falls back to a different format interpretation;
/// consumers needing monotonic values clamp on their side.
pub trait ProgressSink {
    /// Reports a milestone with a human-readable message.
    fn milestone(&mut self, percent: u8, message: &str);
}

/// No-op sink for callers that do not track progress.
#[derive(Debug, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn milestone(&mut self, _percent: u8, _message: &str) {}
}
