//! The `spooledfile:` scheme provider
//!
//! Spooled files are immutable on the remote system, so the provider keeps no
//! per-file state: each call decodes its own locator and either fetches
//! content, exports a local copy, or refuses.

use crate::error::{FsError, Result};
use crate::model::filesystem::{
    DeleteOptions, FileChangeEvent, FileStat, FileType, RenameOptions, VirtualFileSystem,
    WatchHandle, WatchOptions, WriteOptions,
};
use crate::model::{Locator, SCHEME};
use crate::services::export::{self, ExportOutcome, SaveLocationPicker};
use crate::services::notify::{Notifier, TracingNotifier};
use crate::services::remote::{SessionSource, SpooledFileRequest, FETCH_FORMAT};
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Virtual filesystem over remote spooled files
pub struct SplfFileSystem {
    session: Arc<dyn SessionSource>,
    picker: Arc<dyn SaveLocationPicker>,
    notifier: Arc<dyn Notifier>,
    /// Directory the export prompt starts in
    home_dir: Option<PathBuf>,
    /// Never fired: the remote resources do not change under the host
    changes: broadcast::Sender<Vec<FileChangeEvent>>,
}

impl fmt::Debug for SplfFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplfFileSystem")
            .field("session", &"<dyn SessionSource>")
            .field("picker", &"<dyn SaveLocationPicker>")
            .field("notifier", &"<dyn Notifier>")
            .field("home_dir", &self.home_dir)
            .finish()
    }
}

impl SplfFileSystem {
    /// Create a provider notifying through the log and exporting relative to
    /// the user's home directory
    pub fn new(session: Arc<dyn SessionSource>, picker: Arc<dyn SaveLocationPicker>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            session,
            picker,
            notifier: Arc::new(TracingNotifier),
            home_dir: dirs::home_dir(),
            changes,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    /// Change notifications for the host. Nothing is ever sent.
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<FileChangeEvent>> {
        self.changes.subscribe()
    }

    /// Read-only decision against the active session's configuration
    pub fn is_read_only(&self, locator: &Locator) -> bool {
        let config = self.session.config();
        locator.is_read_only(config.as_deref())
    }

    /// Save a local copy of `content`, asking the user where.
    ///
    /// Declined prompts and failed disk writes are reported to the user and
    /// returned as outcomes; only a locator without a file segment is an error.
    pub async fn export(&self, locator: &Locator, content: &[u8]) -> Result<ExportOutcome> {
        let suggested = export::suggested_path(self.home_dir.as_deref(), locator)
            .ok_or_else(|| FsError::malformed(locator.path(), "missing spooled file segment"))?;

        let Some(picked) = self.picker.pick_save_location(&suggested).await else {
            tracing::warn!(%locator, "export declined");
            self.notifier
                .info(&format!("Spooled file, {locator}, was not saved."));
            return Ok(ExportOutcome::Declined);
        };

        let path = export::local_path(&picked);
        match export::write_export(&path, content).await {
            Ok(()) => {
                tracing::info!(%locator, path = %path.display(), bytes = content.len(), "exported spooled file");
                self.notifier
                    .info(&format!("Spooled file, {locator}, was saved."));
                Ok(ExportOutcome::Saved(path))
            }
            Err(e) => {
                tracing::error!(%locator, path = %path.display(), "export failed: {e}");
                self.notifier
                    .error(&format!("Error saving spooled file, {locator}! {e}"));
                Ok(ExportOutcome::Failed {
                    path,
                    error: e.to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl VirtualFileSystem for SplfFileSystem {
    fn scheme(&self) -> &'static str {
        SCHEME
    }

    /// Fixed descriptor; no remote lookup is made
    fn stat(&self, locator: &Locator) -> Result<FileStat> {
        Ok(FileStat::file().with_readonly(self.is_read_only(locator)))
    }

    async fn read_file(&self, locator: &Locator) -> Result<Vec<u8>> {
        let (Some(content), Some(_)) = (self.session.content(), self.session.config()) else {
            return Err(FsError::NotConnected);
        };

        let identity = locator.decode_identity()?;
        let options = locator.decode_options();
        tracing::debug!(
            %locator,
            name = %identity.name,
            job = %identity.qualified_job_name,
            number = %identity.number,
            "fetching spooled file"
        );

        let request = SpooledFileRequest {
            path: locator.path(),
            name: &identity.name,
            qualified_job_name: &identity.qualified_job_name,
            number: &identity.number,
            format: FETCH_FORMAT,
            options: &options,
        };

        match content.download(&request).await {
            Some(text) if !text.is_empty() => Ok(text.into_bytes()),
            _ => {
                tracing::warn!(%locator, "spooled file fetch returned no content");
                Err(FsError::FetchFailed {
                    uri: locator.to_string(),
                })
            }
        }
    }

    /// Exports a local copy; nothing is sent to the remote system
    async fn write_file(
        &self,
        locator: &Locator,
        content: &[u8],
        options: WriteOptions,
    ) -> Result<()> {
        tracing::debug!(%locator, ?options, "write requested, exporting locally");
        self.export(locator, content).await.map(|_| ())
    }

    fn rename(&self, _from: &Locator, _to: &Locator, _options: RenameOptions) -> Result<()> {
        Err(FsError::unsupported("rename"))
    }

    fn watch(&self, _locator: &Locator, _options: &WatchOptions) -> WatchHandle {
        WatchHandle::noop()
    }

    fn read_directory(&self, _locator: &Locator) -> Result<Vec<(String, FileType)>> {
        Err(FsError::unsupported("readDirectory"))
    }

    fn create_directory(&self, _locator: &Locator) -> Result<()> {
        Err(FsError::unsupported("createDirectory"))
    }

    fn delete(&self, _locator: &Locator, _options: DeleteOptions) -> Result<()> {
        Err(FsError::unsupported("delete"))
    }
}
