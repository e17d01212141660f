//! Error types for leetsync-client.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from talking to the judge.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport or status failure.
    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// An I/O error on the metadata cache, with annotated path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A response body that did not match the expected shape.
    #[error("unexpected response payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The session cookie was rejected; the user has to refresh it.
    #[error("session rejected by the judge; refresh the cookies in config.json")]
    Unauthorized,
}

/// Convenience constructor for [`ClientError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ClientError {
    ClientError::Io {
        path: path.into(),
        source,
    }
}

impl From<ureq::Error> for ClientError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(401 | 403, _) => ClientError::Unauthorized,
            other => ClientError::Http(Box::new(other)),
        }
    }
}
