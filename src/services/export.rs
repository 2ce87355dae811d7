//! Exporting a spooled file to local disk
//!
//! Writing to a spooled file never reaches the remote system. It saves a local
//! copy instead, in three separate steps:
//! 1. derive a suggested file name from the locator ([`suggested_file_name`])
//! 2. let the user choose where to save it ([`SaveLocationPicker`])
//! 3. write the bytes to that path ([`write_export`])

use crate::model::Locator;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Extension given to exported copies
pub const EXPORT_EXTENSION: &str = "txt";

/// Lets the user choose where a local copy is saved
#[async_trait]
pub trait SaveLocationPicker: Send + Sync {
    /// Returns `None` when the user dismisses the prompt
    async fn pick_save_location(&self, suggested: &Path) -> Option<PathBuf>;
}

/// How an export ended. None of these is an error for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// The user dismissed the save prompt
    Declined,
    Failed { path: PathBuf, error: String },
}

/// `name~jobName~jobUser~jobNumber~number.splf.txt` for a well-formed locator
pub fn suggested_file_name(locator: &Locator) -> Option<String> {
    locator
        .key_segment()
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("{segment}.{EXPORT_EXTENSION}"))
}

/// Suggested file name placed under `home` (or relative when there is no home)
pub fn suggested_path(home: Option<&Path>, locator: &Locator) -> Option<PathBuf> {
    let name = suggested_file_name(locator)?;
    Some(match home {
        Some(home) => home.join(name),
        None => PathBuf::from(name),
    })
}

/// Turn a picked location into a local filesystem path.
///
/// Pickers report URI-style paths. On Windows those carry an extra leading
/// separator (`/C:/Users/...`) that must go before the path is usable.
pub fn local_path(picked: &Path) -> PathBuf {
    strip_uri_separator(picked, cfg!(windows))
}

fn strip_uri_separator(picked: &Path, windows: bool) -> PathBuf {
    if windows {
        if let Some(stripped) = picked.to_str().and_then(|p| p.strip_prefix('/')) {
            return PathBuf::from(stripped);
        }
    }
    picked.to_path_buf()
}

/// Write `content` verbatim to `path`, replacing any existing file
pub async fn write_export(path: &Path, content: &[u8]) -> io::Result<()> {
    tokio::fs::write(path, content).await
}
