//! Problem metadata — titleSlug → frontend question id.
//!
//! The judge's submission API reports slugs but not question ids, so the
//! client resolves ids through the problem listing. The full listing is
//! large and changes rarely, so it is cached at
//! `<home>/.leetsync/state/problems.json` and only refetched on demand.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use leetsync_core::config;

use crate::error::{io_err, ClientError};

/// Slug → frontend question id.
pub type ProblemMap = HashMap<String, String>;

#[derive(Debug, Deserialize)]
struct ProblemListing {
    stat_status_pairs: Vec<ProblemEntry>,
}

#[derive(Debug, Deserialize)]
struct ProblemEntry {
    stat: ProblemStat,
}

#[derive(Debug, Deserialize)]
struct ProblemStat {
    #[serde(rename = "question__title_slug")]
    title_slug: String,
    frontend_question_id: serde_json::Number,
}

/// `<home>/.leetsync/state/problems.json` — pure, no I/O.
pub fn cache_path_at(home: &Path) -> PathBuf {
    config::state_dir_at(home).join("problems.json")
}

/// Parse the `/api/problems/algorithms/` listing body into a [`ProblemMap`].
pub(crate) fn parse_listing(body: &str) -> Result<ProblemMap, ClientError> {
    let listing: ProblemListing = serde_json::from_str(body)?;
    Ok(listing
        .stat_status_pairs
        .into_iter()
        .map(|e| (e.stat.title_slug, e.stat.frontend_question_id.to_string()))
        .collect())
}

/// Load the cached problem map, if the cache file exists.
pub fn load_cache_at(home: &Path) -> Result<Option<ProblemMap>, ClientError> {
    let path = cache_path_at(home);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    Ok(Some(serde_json::from_str(&contents)?))
}

/// Save the problem map atomically (`.tmp` + rename).
pub fn save_cache_at(home: &Path, map: &ProblemMap) -> Result<(), ClientError> {
    let path = cache_path_at(home);
    let Some(dir) = path.parent() else {
        return Err(io_err(path, std::io::Error::other("invalid cache path")));
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let json = serde_json::to_string_pretty(map)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
