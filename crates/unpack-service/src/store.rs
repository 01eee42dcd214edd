//! Pluggable job status store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::SystemTime;

use crate::job::JobRecord;
use crate::job::JobStatus;

/// Errors from the job status store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The job id is not present in the store.
    #[error("job not found: {job_id}")]
    NotFound {
        /// The id that was looked up.
        job_id: String,
    },

    /// The backing store could not be reached or refused the write.
    #[error("job store unavailable: {detail}")]
    Unavailable {
        /// Backend diagnostic.
        detail: String,
    },
}

/// A partial update to one job record. `None` fields are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct JobUpdate {
    /// New lifecycle state, if it changes.
    pub status: Option<JobStatus>,
    /// New progress percentage, if it changes.
    pub progress: Option<u8>,
    /// New status line, if it changes.
    pub message: Option<String>,
}

impl JobUpdate {
    /// An update touching only the status field.
    #[must_use]
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// The keyed job record collaborator: read by id, update fields in place.
///
/// Every successful update stamps `updated_at`; concurrent writers follow
/// last-write-wins.
pub trait JobStore: Send + Sync {
    /// Registers a new queued job under the given id.
    fn create(&self, job_id: &str) -> Result<(), StoreError>;

    /// Reads the current record for a job.
    fn get(&self, job_id: &str) -> Result<JobRecord, StoreError>;

    /// Applies a partial update to a job record.
    fn update(&self, job_id: &str, update: JobUpdate) -> Result<(), StoreError>;
}

/// In-memory reference store.
#[derive(Debug, Default)]
pub struct MemoryJobStore {
    jobs: Mutex<HashMap<String, JobRecord>>,
}

impl MemoryJobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, JobRecord>>, StoreError> {
        self.jobs.lock().map_err(|e| StoreError::Unavailable {
            detail: format!("job map poisoned: {e}"),
        })
    }
}

impl JobStore for MemoryJobStore {
    fn create(&self, job_id: &str) -> Result<(), StoreError> {
        let mut jobs = self.lock()?;
        jobs.insert(job_id.to_string(), JobRecord::queued());
        Ok(())
    }

    fn get(&self, job_id: &str) -> Result<JobRecord, StoreError> {
        let jobs = self.lock()?;
        jobs.get(job_id).cloned().ok_or_else(|| StoreError::NotFound {
            job_id: job_id.to_string(),
        })
    }

    fn update(&self, job_id: &str, update: JobUpdate) -> Result<(), StoreError> {
        let mut jobs = self.lock()?;
        let record = jobs.get_mut(job_id).ok_or_else(|| StoreError::NotFound {
            job_id: job_id.to_string(),
        })?;

        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(progress) = update.progress {
            record.progress = progress;
        }
        if let Some(message) = update.message {
            record.message = message;
        }
        record.updated_at = SystemTime::now();
        Ok(())
    }
}
