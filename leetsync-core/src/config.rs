//! User configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.leetsync/
//!   config.json     (session cookies + solutions repo path)
//!   state/
//!     committed.json  (sync state — owned by leetsync-sync)
//!     problems.json   (problem metadata cache — owned by leetsync-client)
//! ```
//!
//! # API pattern
//!
//! Every function takes an explicit `home: &Path` so tests can point it at a
//! `TempDir`. Only the CLI resolves the real home via `dirs::home_dir()`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Credentials and destination for a sync run.
///
/// The session cookie pair is lifted from a logged-in browser session;
/// interactive login is deliberately not part of this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Value of the `LEETCODE_SESSION` cookie.
    pub leetcode_session: String,
    /// Value of the `csrftoken` cookie.
    pub csrf_token: String,
    /// Absolute path to the local solutions git repository.
    pub solutions_repo: PathBuf,
    /// Remote to push to after a successful sync.
    #[serde(default = "default_remote")]
    pub remote: String,
}

fn default_remote() -> String {
    "origin".to_owned()
}

/// `<home>/.leetsync/` — pure, no I/O.
pub fn app_dir_at(home: &Path) -> PathBuf {
    home.join(".leetsync")
}

/// `<home>/.leetsync/state/` — pure, no I/O.
pub fn state_dir_at(home: &Path) -> PathBuf {
    app_dir_at(home).join("state")
}

/// `<home>/.leetsync/config.json` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    app_dir_at(home).join("config.json")
}

/// Load the config from `<home>/.leetsync/config.json`.
///
/// Returns `ConfigError::ConfigNotFound` if absent,
/// `ConfigError::Parse` (with path context) if malformed JSON.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// Save the config atomically (`.tmp` + rename), creating `~/.leetsync/`
/// if needed.
pub fn save_at(home: &Path, config: &Config) -> Result<(), ConfigError> {
    let path = config_path_at(home);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
