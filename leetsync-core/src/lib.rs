//! Leetsync core library — domain types, filename policy, config, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and the [`Submission`] record
//! - [`filename`] — deterministic solution-path policy
//! - [`config`] — `~/.leetsync/config.json` load / save
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod filename;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{Language, ProblemId, Submission};
