//! Error types for leetsync-git.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from repository operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Underlying libgit2 failure.
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// The configured solutions repo path is not a git repository.
    #[error("not a git repository: {path}")]
    RepoNotFound { path: PathBuf },

    /// Bare repositories have no working tree to write solutions into.
    #[error("repository at {path} is bare; a working tree is required")]
    BareRepository { path: PathBuf },

    /// `commit_file` was called for a path that is not in the working tree.
    #[error("cannot commit — file missing: {path}")]
    MissingFile { path: PathBuf },

    /// Spawning the `git push` subprocess failed.
    #[error("failed to run git push: {0}")]
    PushSpawn(#[from] std::io::Error),

    /// `git push` exited non-zero.
    #[error("git push to '{remote}' failed with {status}")]
    PushFailed {
        remote: String,
        status: std::process::ExitStatus,
    },
}
