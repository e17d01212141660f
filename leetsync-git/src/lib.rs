//! # leetsync-git
//!
//! Repository-writer collaborator for the sync pipeline, backed by libgit2.
//! One call to [`GitRepository::commit_file`] stages one already-written
//! file and commits it; committing a path with no diff against HEAD is a
//! successful no-op. Pushing delegates to the `git` CLI so the user's
//! credential helpers apply.

pub mod error;

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{ErrorCode, Repository};

use leetsync_sync::{BoxError, RepositoryWriter};

pub use error::GitError;

/// An open, non-bare solutions repository.
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("workdir", &self.workdir)
            .finish_non_exhaustive()
    }
}

impl GitRepository {
    /// Open the repository at `path`. Fails if the path is not a git
    /// repository or the repository is bare.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::RepoNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                GitError::Git(e)
            }
        })?;
        let Some(workdir) = repo.workdir().map(Path::to_path_buf) else {
            return Err(GitError::BareRepository {
                path: path.to_path_buf(),
            });
        };
        Ok(Self { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Stage `relative_path` and commit it with `message`.
    ///
    /// The file must already exist in the working tree. Returns `true` if a
    /// commit was created, `false` when the staged tree matched HEAD (no-op).
    pub fn commit_file(&self, relative_path: &Path, message: &str) -> Result<bool, GitError> {
        let abs_path = self.workdir.join(relative_path);
        if !abs_path.exists() {
            return Err(GitError::MissingFile { path: abs_path });
        }

        let mut index = self.repo.index()?;
        index.add_path(relative_path)?;
        index.write()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            // First commit in a fresh repository.
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(parent_commit) = &parent {
            if parent_commit.tree()?.id() == tree_id {
                log::debug!("no changes to commit for {}", relative_path.display());
                return Ok(false);
            }
        }

        let sig = self.repo.signature()?;
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        log::info!("committed: {}", relative_path.display());
        Ok(true)
    }

    /// Push the current branch to `remote` via the `git` CLI.
    pub fn push(&self, remote: &str) -> Result<(), GitError> {
        let status = Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(["push", remote])
            .status()?;
        if !status.success() {
            return Err(GitError::PushFailed {
                remote: remote.to_owned(),
                status,
            });
        }
        Ok(())
    }
}

impl RepositoryWriter for GitRepository {
    fn commit_file(&mut self, relative_path: &Path, message: &str) -> Result<(), BoxError> {
        GitRepository::commit_file(self, relative_path, message)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
