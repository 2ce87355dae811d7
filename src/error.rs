//! Error types surfaced by the spooled file provider

use std::io;

/// Errors returned by locator decoding and provider operations.
///
/// Export declines and local write failures are not represented here: they are
/// reported to the user and returned as an [`ExportOutcome`](crate::services::export::ExportOutcome).
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// No active remote session, or the session has no content capability
    #[error("Not connected to the remote system")]
    NotConnected,

    /// The remote fetch produced no content
    #[error("Couldn't read {uri}; check the remote connection.")]
    FetchFailed { uri: String },

    /// Operation that makes no sense for an immutable, flat resource
    #[error("{operation} is not implemented for spooled files")]
    Unsupported { operation: &'static str },

    #[error("malformed spooled file locator {path:?}: {reason}")]
    MalformedLocator { path: String, reason: String },

    #[error("expected scheme `spooledfile`, found `{found}`")]
    InvalidScheme { found: String },

    #[error("invalid locator URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FsError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        FsError::MalformedLocator {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(operation: &'static str) -> Self {
        FsError::Unsupported { operation }
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
