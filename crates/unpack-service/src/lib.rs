//! Job-scoped extraction: scheduling, status tracking, and indexing handoff.
//!
//! `unpack-service` wraps the blocking extraction engine from `unpack-core`
//! in a fire-and-forget job model. Each scheduled job moves through
//! `queued → extracting → indexing → completed` (or `error` from any
//! non-terminal state), with progress milestones persisted to a pluggable
//! job store. Extraction work runs on a bounded blocking pool so a burst of
//! uploads cannot exhaust the runtime.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod indexer;
pub mod job;
pub mod reporter;
pub mod service;
pub mod store;

pub use indexer::FileIndexer;
pub use indexer::IndexError;
pub use indexer::NoopIndexer;
pub use job::JobProgress;
pub use job::JobRecord;
pub use job::JobStatus;
pub use reporter::JobReporter;
pub use service::DEFAULT_MAX_JOBS;
pub use service::ExtractionRequest;
pub use service::ExtractionService;
pub use store::JobStore;
pub use store::JobUpdate;
pub use store::MemoryJobStore;
pub use store::StoreError;
