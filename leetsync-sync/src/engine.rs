//! Reconciliation engine — decides, per fetched submission, whether it is
//! new work or already handled, and drives the write → commit → mark-synced
//! transaction for new work.
//!
//! ## Per-submission protocol
//!
//! 1. Skip if the (problem, language) pair is already in the sync state.
//! 2. Compute the target path via the filename policy.
//! 3. Ensure the parent directory exists.
//! 4. Write the solution code, overwriting any stale file at that path.
//! 5. Commit via the [`RepositoryWriter`].
//! 6. Only after the commit succeeds, mark the pair synced in memory.
//!
//! A pair is never marked synced without steps 3–5 completing, so a crash
//! mid-run re-attempts the submission on the next run instead of losing it.

use std::path::{Path, PathBuf};

use leetsync_core::filename;
use leetsync_core::types::{Language, ProblemId, Submission};

use crate::error::{BoxError, SyncError};
use crate::state::SyncState;

// ---------------------------------------------------------------------------
// Collaborator seam
// ---------------------------------------------------------------------------

/// Version-control side of the sync: stages the already-written file at
/// `relative_path` and commits it with `message`.
///
/// A no-op (the working tree has no diff at that path) is a success, not a
/// failure. Staging or commit failures must be returned, not swallowed.
pub trait RepositoryWriter {
    fn commit_file(&mut self, relative_path: &Path, message: &str) -> Result<(), BoxError>;
}

// ---------------------------------------------------------------------------
// Policy and report
// ---------------------------------------------------------------------------

/// What to do when writing or committing one submission fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failure.
    #[default]
    FailFast,
    /// Record the submission as failed and continue with the next one.
    KeepGoing,
}

/// Outcome of reconciling a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Written, committed, and marked synced.
    Synced { path: PathBuf },
    /// Already recorded in the sync state; no side effects.
    Skipped,
    /// Dry-run: would have been written and committed.
    WouldSync { path: PathBuf },
    /// Write or commit failed ([`FailurePolicy::KeepGoing`] only); the pair
    /// was not marked synced.
    Failed { path: PathBuf, error: String },
}

/// One line of the sync report, in fetch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub problem_id: ProblemId,
    pub title: String,
    pub language: Language,
    pub outcome: SyncOutcome,
}

/// Ordered record of what a reconcile run did. Purely informational: the
/// engine never branches on it.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub entries: Vec<ReportEntry>,
}

impl SyncReport {
    pub fn synced_count(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Synced { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Skipped))
    }

    pub fn would_sync_count(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::WouldSync { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    fn count(&self, pred: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

// ---------------------------------------------------------------------------
// Commit message
// ---------------------------------------------------------------------------

/// Commit message for one solution. Deterministic in the
/// (problem, title, language) triple and uniquely identifies it in history.
pub fn commit_message(problem_id: &ProblemId, title: &str, language: &Language) -> String {
    format!("Add solution for {problem_id}. {title} [{language}]")
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Reconciles fetched submissions against the sync state.
///
/// Strictly sequential: one submission is fully processed before the next
/// begins, in fetch order. The engine trusts the sync state, not disk
/// contents, as the source of truth for "already handled".
#[derive(Debug)]
pub struct ReconcileEngine<'a> {
    repo_root: &'a Path,
    policy: FailurePolicy,
    dry_run: bool,
}

impl<'a> ReconcileEngine<'a> {
    pub fn new(repo_root: &'a Path, policy: FailurePolicy) -> Self {
        Self {
            repo_root,
            policy,
            dry_run: false,
        }
    }

    /// Classify instead of acting: no writes, no commits, no state changes.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process `submissions` in order, mutating `state` in memory as each
    /// one succeeds. The caller persists `state` afterwards — including when
    /// this returns an error, so partial progress survives a fail-fast abort.
    pub fn reconcile(
        &self,
        submissions: &[Submission],
        state: &mut SyncState,
        writer: &mut dyn RepositoryWriter,
    ) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();

        for sub in submissions {
            let outcome = self.reconcile_one(sub, state, writer);
            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(err) => match self.policy {
                    FailurePolicy::FailFast => return Err(err),
                    FailurePolicy::KeepGoing => {
                        log::warn!("sync failed, continuing: {err}");
                        let path =
                            filename::solution_path(&sub.problem_id, &sub.title, &sub.language);
                        SyncOutcome::Failed {
                            path,
                            error: err.to_string(),
                        }
                    }
                },
            };
            report.entries.push(ReportEntry {
                problem_id: sub.problem_id.clone(),
                title: sub.title.clone(),
                language: sub.language.clone(),
                outcome,
            });
        }

        Ok(report)
    }

    fn reconcile_one(
        &self,
        sub: &Submission,
        state: &mut SyncState,
        writer: &mut dyn RepositoryWriter,
    ) -> Result<SyncOutcome, SyncError> {
        // Repeats within a batch hit this check just like repeats across
        // runs: once marked, every later occurrence skips.
        if state.is_synced(&sub.problem_id, &sub.language) {
            log::debug!(
                "skipping {} [{}] — already committed",
                sub.title,
                sub.language
            );
            return Ok(SyncOutcome::Skipped);
        }

        let rel_path = filename::solution_path(&sub.problem_id, &sub.title, &sub.language);

        if self.dry_run {
            log::info!("[dry-run] would sync: {}", rel_path.display());
            return Ok(SyncOutcome::WouldSync { path: rel_path });
        }

        self.write_and_commit(sub, &rel_path, writer)?;

        // Mark only after the commit succeeded; a failure above leaves the
        // pair unmarked so the next run retries it.
        state.mark_synced(&sub.problem_id, &sub.language);
        log::info!("synced: {}", rel_path.display());

        Ok(SyncOutcome::Synced { path: rel_path })
    }

    fn write_and_commit(
        &self,
        sub: &Submission,
        rel_path: &Path,
        writer: &mut dyn RepositoryWriter,
    ) -> Result<(), SyncError> {
        let submission_err = |source: BoxError| SyncError::Submission {
            problem_id: sub.problem_id.clone(),
            language: sub.language.clone(),
            path: rel_path.to_path_buf(),
            source,
        };

        let abs_path = self.repo_root.join(rel_path);
        if let Some(parent) = abs_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| submission_err(Box::new(e)))?;
        }
        // Overwrite semantics: a stale, unsynced file at this path is replaced.
        std::fs::write(&abs_path, &sub.code).map_err(|e| submission_err(Box::new(e)))?;

        let message = commit_message(&sub.problem_id, &sub.title, &sub.language);
        writer.commit_file(rel_path, &message).map_err(submission_err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Writer that records every commit and can be told to fail on specific
    /// call indices (0-based).
    #[derive(Default)]
    struct RecordingWriter {
        commits: Vec<(PathBuf, String)>,
        fail_on: Vec<usize>,
        calls: usize,
    }

    impl RepositoryWriter for RecordingWriter {
        fn commit_file(&mut self, relative_path: &Path, message: &str) -> Result<(), BoxError> {
            let call = self.calls;
            self.calls += 1;
            if self.fail_on.contains(&call) {
                return Err("simulated commit failure".into());
            }
            self.commits
                .push((relative_path.to_path_buf(), message.to_owned()));
            Ok(())
        }
    }

    fn submission(pid: &str, title: &str, lang: &str) -> Submission {
        Submission {
            problem_id: ProblemId::from(pid),
            title: title.to_owned(),
            language: Language::from(lang),
            code: format!("// solution for {title} in {lang}\n"),
        }
    }

    fn two_sum_python() -> Submission {
        submission("1", "Two Sum", "python")
    }

    #[test]
    fn new_submission_is_written_committed_and_marked() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter::default();
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);

        let report = engine
            .reconcile(&[two_sum_python()], &mut state, &mut writer)
            .unwrap();

        assert_eq!(report.synced_count(), 1);
        let expected = PathBuf::from("python/1_two_sum.py");
        assert_eq!(writer.commits.len(), 1);
        assert_eq!(writer.commits[0].0, expected);
        assert_eq!(
            writer.commits[0].1,
            "Add solution for 1. Two Sum [python]"
        );
        assert!(state.is_synced(&ProblemId::from("1"), &Language::from("python")));

        let on_disk = std::fs::read_to_string(repo.path().join(&expected)).unwrap();
        assert_eq!(on_disk, two_sum_python().code);
    }

    #[test]
    fn already_synced_submission_is_skipped_without_side_effects() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        state.mark_synced(&ProblemId::from("1"), &Language::from("python"));
        let mut writer = RecordingWriter::default();
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);

        let report = engine
            .reconcile(&[two_sum_python()], &mut state, &mut writer)
            .unwrap();

        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.synced_count(), 0);
        assert!(writer.commits.is_empty());
        assert!(
            !repo.path().join("python/1_two_sum.py").exists(),
            "skip must not write files"
        );
    }

    #[test]
    fn reconcile_twice_is_idempotent() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter::default();
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);
        let batch = vec![two_sum_python(), submission("121", "Best Time", "cpp")];

        let first = engine.reconcile(&batch, &mut state, &mut writer).unwrap();
        assert_eq!(first.synced_count(), 2);

        let second = engine.reconcile(&batch, &mut state, &mut writer).unwrap();
        assert_eq!(second.synced_count(), 0);
        assert_eq!(second.skipped_count(), 2);
        assert_eq!(writer.commits.len(), 2, "no new commits on second run");
    }

    #[test]
    fn repeats_within_one_batch_commit_once() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter::default();
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);

        // Resubmission history: the same pair appears twice in one fetch.
        let batch = vec![two_sum_python(), two_sum_python()];
        let report = engine.reconcile(&batch, &mut state, &mut writer).unwrap();

        assert_eq!(report.synced_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(writer.commits.len(), 1);
    }

    #[test]
    fn same_problem_in_two_languages_commits_twice() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter::default();
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);

        let batch = vec![
            submission("1", "Two Sum", "python"),
            submission("1", "Two Sum", "cpp"),
        ];
        let report = engine.reconcile(&batch, &mut state, &mut writer).unwrap();

        assert_eq!(report.synced_count(), 2);
        assert_eq!(writer.commits.len(), 2);
        assert!(state.is_synced(&ProblemId::from("1"), &Language::from("python")));
        assert!(state.is_synced(&ProblemId::from("1"), &Language::from("cpp")));
    }

    #[test]
    fn commit_failure_does_not_mark_synced() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter {
            fail_on: vec![0],
            ..Default::default()
        };
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);

        let err = engine
            .reconcile(&[two_sum_python()], &mut state, &mut writer)
            .unwrap_err();

        assert!(matches!(err, SyncError::Submission { .. }));
        assert!(
            !state.is_synced(&ProblemId::from("1"), &Language::from("python")),
            "failed submission must not be marked synced"
        );
    }

    #[test]
    fn fail_fast_preserves_earlier_marks() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter {
            fail_on: vec![1],
            ..Default::default()
        };
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);

        let batch = vec![
            submission("1", "Two Sum", "python"),
            submission("2", "Add Two Numbers", "python"),
            submission("3", "Longest Substring", "python"),
        ];
        let err = engine.reconcile(&batch, &mut state, &mut writer).unwrap_err();
        match err {
            SyncError::Submission {
                problem_id,
                language,
                path,
                ..
            } => {
                assert_eq!(problem_id, ProblemId::from("2"));
                assert_eq!(language, Language::from("python"));
                assert_eq!(path, PathBuf::from("python/2_add_two_numbers.py"));
            }
            other => panic!("expected Submission error, got {other:?}"),
        }

        assert!(state.is_synced(&ProblemId::from("1"), &Language::from("python")));
        assert!(!state.is_synced(&ProblemId::from("2"), &Language::from("python")));
        assert!(
            !state.is_synced(&ProblemId::from("3"), &Language::from("python")),
            "fail-fast must not process later submissions"
        );
    }

    #[test]
    fn keep_going_records_failure_and_continues() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter {
            fail_on: vec![1],
            ..Default::default()
        };
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::KeepGoing);

        let batch = vec![
            submission("1", "Two Sum", "python"),
            submission("2", "Add Two Numbers", "python"),
            submission("3", "Longest Substring", "python"),
        ];
        let report = engine.reconcile(&batch, &mut state, &mut writer).unwrap();

        assert_eq!(report.synced_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(report.has_failures());
        assert!(matches!(
            report.entries[1].outcome,
            SyncOutcome::Failed { .. }
        ));
        assert!(state.is_synced(&ProblemId::from("1"), &Language::from("python")));
        assert!(!state.is_synced(&ProblemId::from("2"), &Language::from("python")));
        assert!(state.is_synced(&ProblemId::from("3"), &Language::from("python")));
    }

    #[test]
    fn unknown_problem_sentinel_is_processed_normally() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter::default();
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);

        // Two unrelated problems both carrying the "0" sentinel; they only
        // disambiguate by (title, language) in the filesystem.
        let batch = vec![
            submission("0", "Mystery Problem", "python"),
            submission("0", "Other Mystery", "cpp"),
        ];
        let report = engine.reconcile(&batch, &mut state, &mut writer).unwrap();

        assert_eq!(report.synced_count(), 2);
        assert!(repo.path().join("python/0_mystery_problem.py").exists());
        assert!(repo.path().join("cpp/0_other_mystery.cpp").exists());
    }

    #[test]
    fn dry_run_has_no_side_effects() {
        let repo = TempDir::new().unwrap();
        let mut state = SyncState::empty();
        let mut writer = RecordingWriter::default();
        let engine =
            ReconcileEngine::new(repo.path(), FailurePolicy::FailFast).with_dry_run(true);

        let report = engine
            .reconcile(&[two_sum_python()], &mut state, &mut writer)
            .unwrap();

        assert_eq!(report.would_sync_count(), 1);
        assert!(writer.commits.is_empty());
        assert!(state.is_empty(), "dry-run must not mark anything synced");
        assert!(!repo.path().join("python/1_two_sum.py").exists());
    }

    #[test]
    fn overwrites_stale_unsynced_file() {
        let repo = TempDir::new().unwrap();
        let stale = repo.path().join("python/1_two_sum.py");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, "stale content").unwrap();

        let mut state = SyncState::empty();
        let mut writer = RecordingWriter::default();
        let engine = ReconcileEngine::new(repo.path(), FailurePolicy::FailFast);
        engine
            .reconcile(&[two_sum_python()], &mut state, &mut writer)
            .unwrap();

        let on_disk = std::fs::read_to_string(&stale).unwrap();
        assert_eq!(on_disk, two_sum_python().code, "overwrite, not append");
    }

    #[test]
    fn commit_message_identifies_the_triple() {
        let msg = commit_message(
            &ProblemId::from("121"),
            "Best Time to Buy and Sell Stock",
            &Language::from("cpp"),
        );
        assert_eq!(
            msg,
            "Add solution for 121. Best Time to Buy and Sell Stock [cpp]"
        );
    }
}
