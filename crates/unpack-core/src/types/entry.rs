//! Extracted entry descriptor handed to the indexing collaborator.

use std::path::PathBuf;

/// One extracted artifact on disk.
///
/// Produced by [`crate::listing::list_extracted`] after a successful run and
/// consumed by the downstream indexer; never persisted by this crate. The
/// `relative_path` is the job-scoped key the indexer deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Absolute path on disk.
    pub path: PathBuf,

    /// Path relative to the job's extraction root, with the logical prefix
    /// applied (always uses `/` separators).
    pub relative_path: String,

    /// Size in bytes.
    pub size: u64,
}
