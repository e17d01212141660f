//! Sync state — durable record of which (problem, language) pairs have
//! already been committed.
//!
//! Persists a JSON document at `<home>/.leetsync/state/committed.json`.
//! Writes use an atomic `.tmp` + rename pattern. The historical flat-map
//! layout (`{"121": ["cpp", "python"]}`) is still accepted on load and
//! migrated to the structured layout on the next save.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leetsync_core::config;
use leetsync_core::types::{Language, ProblemId};

use crate::error::{io_err, SyncError};

/// In-memory sync state: problem id → set of languages already committed.
///
/// Entries are only ever added, never removed; there is no "unsync"
/// operation. The state is trusted as the sole source of truth for "already
/// handled" — disk contents are not re-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    /// When the last real (non-dry-run) sync completed.
    pub synced_at: DateTime<Utc>,
    problems: BTreeMap<String, BTreeSet<String>>,
}

impl SyncState {
    /// Fresh empty state — the expected first-run / bootstrap case.
    pub fn empty() -> Self {
        Self {
            synced_at: Utc::now(),
            problems: BTreeMap::new(),
        }
    }

    /// Has this (problem, language) pair already been committed?
    pub fn is_synced(&self, problem_id: &ProblemId, language: &Language) -> bool {
        self.problems
            .get(problem_id.as_str())
            .is_some_and(|langs| langs.contains(language.as_str()))
    }

    /// Record a pair as committed. Idempotent: inserting an already-present
    /// pair is a no-op, not an error.
    pub fn mark_synced(&mut self, problem_id: &ProblemId, language: &Language) {
        self.problems
            .entry(problem_id.as_str().to_owned())
            .or_default()
            .insert(language.as_str().to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Number of distinct problems with at least one synced language.
    pub fn problem_count(&self) -> usize {
        self.problems.len()
    }

    /// Total number of synced (problem, language) pairs.
    pub fn pair_count(&self) -> usize {
        self.problems.values().map(BTreeSet::len).sum()
    }

    /// Synced pairs per language, for status reporting.
    pub fn counts_by_language(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for langs in self.problems.values() {
            for lang in langs {
                *counts.entry(lang.clone()).or_default() += 1;
            }
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// On-disk layout
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct StateFile<'a> {
    synced_at: DateTime<Utc>,
    problems: &'a BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StateCompat {
    Structured(StateStructuredCompat),
    Legacy(BTreeMap<String, BTreeSet<String>>),
}

#[derive(Debug, Deserialize)]
struct StateStructuredCompat {
    synced_at: Option<DateTime<Utc>>,
    problems: BTreeMap<String, BTreeSet<String>>,
}

/// Path to the sync state JSON, rooted at `home`.
///
/// `~/.leetsync/state/committed.json`
pub fn state_path_at(home: &Path) -> PathBuf {
    config::state_dir_at(home).join("committed.json")
}

/// Load the sync state.
///
/// Returns an empty state if the file does not yet exist — absence is the
/// bootstrap case, not an error.
pub fn load_at(home: &Path) -> Result<SyncState, SyncError> {
    let path = state_path_at(home);
    if !path.exists() {
        return Ok(SyncState::empty());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    match serde_json::from_str::<StateCompat>(&contents)? {
        StateCompat::Structured(state) => Ok(SyncState {
            synced_at: state.synced_at.unwrap_or_else(Utc::now),
            problems: state.problems,
        }),
        StateCompat::Legacy(problems) => Ok(SyncState {
            synced_at: Utc::now(),
            problems,
        }),
    }
}

/// Save the sync state atomically, fully overwriting prior content.
///
/// Writes to `<path>.tmp` then renames to `<path>`.
pub fn save_at(home: &Path, state: &SyncState) -> Result<(), SyncError> {
    let path = state_path_at(home);
    let Some(dir) = path.parent() else {
        return Err(io_err(path, std::io::Error::other("invalid state path")));
    };

    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let file = StateFile {
        synced_at: state.synced_at,
        problems: &state.problems,
    };
    let json = serde_json::to_string_pretty(&file)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
