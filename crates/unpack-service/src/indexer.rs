//! Interface to the search-indexing collaborator.

use std::path::Path;

use unpack_core::ExtractedEntry;

/// Failure reported by the indexing collaborator.
#[derive(Debug, thiserror::Error)]
#[error("indexing failed: {detail}")]
pub struct IndexError {
    /// Collaborator diagnostic.
    pub detail: String,
}

/// Records extracted files for search, keyed by job-scoped relative path.
///
/// Invoked once per successful extraction, while the job is in the
/// `indexing` state, with the normalized entry list for the destination
/// tree. The indexing pass itself lives outside this workspace.
pub trait FileIndexer: Send + Sync {
    /// Indexes the extracted entries of one job.
    fn index_extraction(
        &self,
        job_id: &str,
        dest_dir: &Path,
        logical_prefix: &str,
        entries: &[ExtractedEntry],
    ) -> Result<(), IndexError>;
}

/// Indexer that records nothing. Useful for one-shot extractions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndexer;

impl FileIndexer for NoopIndexer {
    fn index_extraction(
        &self,
        _job_id: &str,
        _dest_dir: &Path,
        _logical_prefix: &str,
        _entries: &[ExtractedEntry],
    ) -> Result<(), IndexError> {
        Ok(())
    }
}
