//! # leetsync-client
//!
//! Judge-side collaborator for the sync pipeline: cookie-session REST
//! client, paginated accepted-submission retrieval, problem-id metadata
//! cache, and language normalization. Implements
//! [`leetsync_sync::SubmissionSource`].

pub mod client;
pub mod error;
pub mod problems;

pub use client::{normalize_language, LeetCodeClient};
pub use error::ClientError;
