//! Domain types shared across the leetsync workspace.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All types are serializable/deserializable via serde + serde_json.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed problem identifier as reported by the judge.
///
/// Opaque and stable. `"0"` is a valid sentinel meaning "unknown problem"
/// (the submission's slug was absent from the problem metadata); it is
/// processed like any other id, never treated as missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(pub String);

impl ProblemId {
    /// The sentinel id used when a submission's slug cannot be resolved.
    pub fn unknown() -> Self {
        Self("0".to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProblemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProblemId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A normalized language tag: lowercase, canonical (`"python"`, `"cpp"`,
/// `"go"`, …). Normalization happens at the submission source boundary;
/// everything downstream consumes the tag as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Language(pub String);

impl Language {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// One accepted solution fetched from the judge.
///
/// Fixed-shape and validated at the source boundary: `title` and `code` are
/// non-empty by the time a record reaches the reconciliation engine, and
/// submissions with missing identifying slugs are filtered upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub problem_id: ProblemId,
    pub title: String,
    pub language: Language,
    pub code: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
