//! Error types for leetsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use leetsync_core::types::{Language, ProblemId};

/// Boxed error type used at the collaborator seams, so any submission-source
/// or repository-writer implementation can surface its own error through the
/// engine.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error (sync state file).
    #[error("sync state JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The submission source could not produce the submission list.
    /// Fatal for the run; nothing has been mutated when this is raised.
    #[error("failed to fetch submissions: {source}")]
    Source {
        #[source]
        source: BoxError,
    },

    /// Writing or committing one submission failed. Carries enough context
    /// (problem, language, path) to diagnose without a re-run.
    #[error("failed to sync problem {problem_id} [{language}] at {path}: {source}")]
    Submission {
        problem_id: ProblemId,
        language: Language,
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
