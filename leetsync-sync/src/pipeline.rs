//! Sync pipeline — load state → fetch → reconcile → persist.
//!
//! This is the canonical run entrypoint for `leetsync sync`.

use std::path::Path;

use chrono::Utc;

use leetsync_core::types::Submission;

use crate::engine::{FailurePolicy, ReconcileEngine, RepositoryWriter, SyncReport};
use crate::error::{BoxError, SyncError};
use crate::state;

/// Remote side of the sync: produces the accepted-submission list for one
/// run. Records are pre-filtered at this boundary — no empty code, no
/// missing identifiers, languages already normalized.
pub trait SubmissionSource {
    fn fetch_accepted_submissions(&mut self) -> Result<Vec<Submission>, BoxError>;
}

/// Options for a pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Classify without writing, committing, marking, or persisting.
    pub dry_run: bool,
    /// What to do when one submission fails to write or commit.
    pub policy: FailurePolicy,
}

/// Run the full sync pipeline.
///
/// State load and the submission fetch are fatal if they fail; the fetch
/// happens before any mutation, so a failed run leaves state untouched.
/// After reconciliation the state is persisted even when the run reported
/// failures (or aborted fail-fast), so successfully-synced items are not
/// re-committed on the next run.
pub fn run(
    home: &Path,
    repo_root: &Path,
    source: &mut dyn SubmissionSource,
    writer: &mut dyn RepositoryWriter,
    options: SyncOptions,
) -> Result<SyncReport, SyncError> {
    let started_at = Utc::now();

    let mut state = state::load_at(home)?;
    log::debug!(
        "loaded sync state: {} problems, {} pairs",
        state.problem_count(),
        state.pair_count()
    );

    let submissions = source
        .fetch_accepted_submissions()
        .map_err(|source| SyncError::Source { source })?;
    log::info!("fetched {} accepted submissions", submissions.len());

    let engine = ReconcileEngine::new(repo_root, options.policy).with_dry_run(options.dry_run);
    let outcome = engine.reconcile(&submissions, &mut state, writer);

    // Persist partial progress regardless of how reconciliation ended.
    // Dry-run made no state changes, so it skips the write.
    if !options.dry_run {
        state.synced_at = started_at;
        state::save_at(home, &state)?;
    }

    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
