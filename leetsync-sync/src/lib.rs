//! # leetsync-sync
//!
//! Incremental-sync reconciliation engine: durable sync state, the
//! skip-or-commit decision procedure, and the pipeline that wires a
//! [`SubmissionSource`] through the engine to a [`RepositoryWriter`].
//!
//! Call [`pipeline::run`] for a full load → fetch → reconcile → persist run.

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod state;

pub use engine::{
    commit_message, FailurePolicy, ReconcileEngine, ReportEntry, RepositoryWriter, SyncOutcome,
    SyncReport,
};
pub use error::{BoxError, SyncError};
pub use pipeline::{SubmissionSource, SyncOptions};
pub use state::SyncState;
