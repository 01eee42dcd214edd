//! Job-facing progress reporting with persistence-failure isolation.

use std::sync::Arc;

use unpack_core::ProgressSink;

use crate::job::JobStatus;
use crate::store::JobStore;
use crate::store::JobUpdate;

/// Writes job status updates, enforcing the lifecycle rules.
///
/// The reporter is the single writer for its job during a run, so it tracks
/// the current status and the high-water progress mark locally instead of
/// reading them back. Three protections apply to every update:
///
/// - illegal state transitions are dropped (the status field only; progress
///   and message still land),
/// - progress never decreases within a run, even when the engine re-emits
///   low milestones after a plain-to-tar fallback,
/// - store failures are logged and swallowed, never failing the extraction
///   itself.
pub struct JobReporter {
    store: Arc<dyn JobStore>,
    job_id: String,
    status: JobStatus,
    high_water: u8,
}

impl JobReporter {
    /// Creates a reporter for a freshly queued job.
    pub fn new(store: Arc<dyn JobStore>, job_id: impl Into<String>) -> Self {
        Self {
            store,
            job_id: job_id.into(),
            status: JobStatus::Queued,
            high_water: 0,
        }
    }

    /// The status as last written by this reporter.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Applies a partial update to the job, subject to the lifecycle rules.
    pub fn update(&mut self, status: Option<JobStatus>, progress: Option<u8>, message: Option<&str>) {
        if self.status.is_terminal() {
            tracing::debug!(
                job_id = %self.job_id,
                status = %self.status,
                "dropping update to terminal job"
            );
            return;
        }

        let status = status.filter(|next| {
            let legal = self.status.can_transition_to(*next);
            if !legal {
                tracing::debug!(
                    job_id = %self.job_id,
                    from = %self.status,
                    to = %next,
                    "dropping illegal status transition"
                );
            }
            legal
        });

        let progress = progress.map(|p| {
            let clamped = p.clamp(self.high_water, 100);
            self.high_water = clamped;
            clamped
        });

        if let Some(next) = status {
            self.status = next;
        }

        let update = JobUpdate {
            status,
            progress,
            message: message.map(str::to_string),
        };
        if let Err(e) = self.store.update(&self.job_id, update) {
            tracing::error!(job_id = %self.job_id, error = %e, "failed to persist job update");
        }
    }
}

impl ProgressSink for JobReporter {
    fn milestone(&mut self, percent: u8, message: &str) {
        self.update(Some(JobStatus::Extracting), Some(percent), Some(message));
    }
}
