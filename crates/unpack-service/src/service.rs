//! Extraction scheduling and the job run body.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use unpack_core::extract_archive;
use unpack_core::list_extracted;
use unpack_core::types::DestDir;

use crate::indexer::FileIndexer;
use crate::job::JobProgress;
use crate::job::JobStatus;
use crate::reporter::JobReporter;
use crate::store::JobStore;

/// Default cap on concurrently running extraction jobs.
pub const DEFAULT_MAX_JOBS: usize = 4;

/// One extraction job as handed to the scheduler.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Job id, unique per upload; one run per id is the caller's duty.
    pub job_id: String,
    /// Path of the uploaded archive.
    pub source: PathBuf,
    /// Directory to extract into; created if absent.
    pub dest_dir: PathBuf,
    /// Prefix for the job-scoped relative keys handed to the indexer.
    pub logical_prefix: String,
}

/// Schedules extraction jobs and exposes their progress.
///
/// Jobs are fire-and-forget: scheduling returns immediately and the run
/// proceeds in the background, always ending in a terminal status. The
/// blocking extraction work runs on the tokio blocking pool, gated by a
/// semaphore so a burst of uploads queues instead of spawning unbounded
/// threads.
pub struct ExtractionService {
    store: Arc<dyn JobStore>,
    indexer: Arc<dyn FileIndexer>,
    permits: Arc<Semaphore>,
}

impl ExtractionService {
    /// Creates a service over the given store and indexing collaborator.
    pub fn new(
        store: Arc<dyn JobStore>,
        indexer: Arc<dyn FileIndexer>,
        max_concurrent_jobs: usize,
    ) -> Self {
        Self {
            store,
            indexer,
            permits: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
        }
    }

    /// Registers the job and starts its extraction in the background.
    ///
    /// The returned handle resolves when the job reaches a terminal state;
    /// callers that don't care may drop it, the task keeps running.
    pub fn schedule_extraction(&self, request: ExtractionRequest) -> JoinHandle<()> {
        if let Err(e) = self.store.create(&request.job_id) {
            tracing::error!(job_id = %request.job_id, error = %e, "failed to register job");
        }

        let store = Arc::clone(&self.store);
        let indexer = Arc::clone(&self.indexer);
        let permits = Arc::clone(&self.permits);

        tokio::spawn(async move {
            let job_id = request.job_id.clone();
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    // Semaphore closed: the service is shutting down.
                    report_failure(&store, &job_id, "Error: service shutting down");
                    return;
                }
            };

            tracing::info!(job_id = %job_id, source = %request.source.display(), "starting extraction job");

            let run_store = Arc::clone(&store);
            let outcome = tokio::task::spawn_blocking(move || {
                run_extraction(&run_store, &*indexer, &request);
            })
            .await;

            if let Err(e) = outcome {
                tracing::error!(job_id = %job_id, error = %e, "extraction task aborted");
                report_failure(&store, &job_id, "Error: extraction task aborted unexpectedly");
            }
        })
    }

    /// Current progress view of a job, or `None` if the id is unknown.
    #[must_use]
    pub fn get_progress(&self, job_id: &str) -> Option<JobProgress> {
        match self.store.get(job_id) {
            Ok(record) => Some(JobProgress::from(&record)),
            Err(e) => {
                tracing::debug!(job_id, error = %e, "progress lookup failed");
                None
            }
        }
    }
}

/// Drives one job from `queued` to a terminal state. Never returns an
/// error: every failure is converted into the job's `error` status.
fn run_extraction(store: &Arc<dyn JobStore>, indexer: &dyn FileIndexer, request: &ExtractionRequest) {
    let mut reporter = JobReporter::new(Arc::clone(store), request.job_id.clone());

    // Resolve before touching the filesystem: an unsupported extension
    // moves the job straight from queued to error.
    if let Err(e) = unpack_core::resolve_format(&request.source) {
        debug_assert!(e.is_preflight());
        reporter.update(Some(JobStatus::Error), None, Some(&format!("{e}")));
        return;
    }

    let dest = match DestDir::create(&request.dest_dir) {
        Ok(dest) => dest,
        Err(e) => {
            reporter.update(Some(JobStatus::Error), None, Some(&format!("Error: {e}")));
            return;
        }
    };

    let report = match extract_archive(&request.source, &dest, &mut reporter) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(job_id = %request.job_id, error = %e, "extraction failed");
            reporter.update(Some(JobStatus::Error), None, Some(&format!("Error: {e}")));
            return;
        }
    };

    reporter.update(
        Some(JobStatus::Indexing),
        Some(95),
        Some("Indexing files for search..."),
    );

    let entries = match list_extracted(&dest, &request.logical_prefix) {
        Ok(entries) => entries,
        Err(e) => {
            reporter.update(Some(JobStatus::Error), None, Some(&format!("Error: {e}")));
            return;
        }
    };

    if let Err(e) =
        indexer.index_extraction(&request.job_id, dest.as_path(), &request.logical_prefix, &entries)
    {
        tracing::error!(job_id = %request.job_id, error = %e, "indexing failed");
        reporter.update(Some(JobStatus::Error), None, Some(&format!("Error: {e}")));
        return;
    }

    reporter.update(
        Some(JobStatus::Completed),
        Some(100),
        Some(&format!(
            "Extraction complete: {} entries, {} skipped",
            report.entries_extracted, report.members_skipped
        )),
    );
    tracing::info!(
        job_id = %request.job_id,
        entries = report.entries_extracted,
        skipped = report.members_skipped,
        bytes = report.bytes_written,
        "extraction job completed"
    );
}

/// Best-effort error write outside a reporter context.
fn report_failure(store: &Arc<dyn JobStore>, job_id: &str, message: &str) {
    let update = crate::store::JobUpdate {
        status: Some(JobStatus::Error),
        progress: None,
        message: Some(message.to_string()),
    };
    if let Err(e) = store.update(job_id, update) {
        tracing::error!(job_id, error = %e, "failed to record job failure");
    }
}
