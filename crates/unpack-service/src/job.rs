//! Job status model and lifecycle rules.

use std::time::SystemTime;

use serde::Deserialize;
use serde::Serialize;

/// Lifecycle state of an extraction job.
///
/// `queued → extracting → indexing → completed`, with `error` reachable from
/// every non-terminal state. `completed` and `error` are terminal and
/// sticky. The only path that skips `extracting` is `queued → error`, taken
/// when the format is rejected before any bytes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted, not yet started.
    Queued,
    /// The extraction engine is running.
    Extracting,
    /// Extraction succeeded; files are being indexed for search.
    Indexing,
    /// Terminal success.
    Completed,
    /// Terminal failure.
    Error,
}

impl JobStatus {
    /// Whether the status is terminal. Terminal states accept no updates.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// Repeating the current working state is permitted so progress
    /// milestones within a phase are legal transitions.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Queued, Self::Extracting | Self::Error)
                | (Self::Extracting, Self::Extracting | Self::Indexing | Self::Error)
                | (Self::Indexing, Self::Indexing | Self::Completed | Self::Error)
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Queued => "queued",
            Self::Extracting => "extracting",
            Self::Indexing => "indexing",
            Self::Completed => "completed",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Stored state of one job.
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Progress percentage, 0 to 100.
    pub progress: u8,
    /// Human-readable status line for the job view.
    pub message: String,
    /// Stamped on every write; last write wins.
    pub updated_at: SystemTime,
}

impl JobRecord {
    /// A freshly created job, queued at zero progress.
    #[must_use]
    pub fn queued() -> Self {
        Self {
            status: JobStatus::Queued,
            progress: 0,
            message: String::from("Queued"),
            updated_at: SystemTime::now(),
        }
    }
}

/// Externally visible progress view of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobProgress {
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Progress percentage, 0 to 100.
    pub progress: u8,
    /// Human-readable status line.
    pub message: String,
}

impl From<&JobRecord> for JobProgress {
    fn from(record: &JobRecord) -> Self {
        Self {
            status: record.status,
            progress: record.progress,
            message: record.message.clone(),
        }
    }
}
