//! Host virtual filesystem contract
//!
//! The host routes every URI with a registered scheme to one provider
//! implementing [`VirtualFileSystem`]. Providers decide per operation what is
//! meaningful for their resources; operations that are not return
//! [`FsError::Unsupported`](crate::error::FsError::Unsupported).
//!
//! The trait is async because reads and writes may wait on remote I/O or on
//! user interaction. Metadata and directory operations stay synchronous.

use super::locator::Locator;
use crate::error::Result;
use async_trait::async_trait;

// ============================================================================
// Metadata Types
// ============================================================================

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// Permission bits the host honours when opening a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilePermission {
    Readonly,
}

/// Metadata reported by `stat`
///
/// Times are milliseconds since the epoch; `0` means unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub file_type: FileType,
    pub ctime: u64,
    pub mtime: u64,
    /// Size in bytes; `0` when the provider does not know it
    pub size: u64,
    pub permissions: Option<FilePermission>,
}

impl FileStat {
    /// A regular file with unknown size and times
    pub fn file() -> Self {
        Self {
            file_type: FileType::File,
            ctime: 0,
            mtime: 0,
            size: 0,
            permissions: None,
        }
    }

    /// Builder: set the readonly bit
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.permissions = readonly.then_some(FilePermission::Readonly);
        self
    }

    pub fn is_readonly(&self) -> bool {
        self.permissions == Some(FilePermission::Readonly)
    }
}

// ============================================================================
// Operation Options
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub create: bool,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameOptions {
    pub overwrite: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    pub recursive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchOptions {
    pub recursive: bool,
    pub excludes: Vec<String>,
}

// ============================================================================
// Change Notification
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileChangeType {
    Changed,
    Created,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChangeEvent {
    pub change: FileChangeType,
    pub locator: Locator,
}

/// Disposable returned by `watch`
///
/// Disposing (or dropping) runs the provider's cleanup, if it registered one.
#[must_use = "dropping a watch handle disposes it"]
pub struct WatchHandle {
    on_dispose: Option<Box<dyn FnOnce() + Send>>,
}

impl WatchHandle {
    /// A handle with nothing to clean up
    pub fn noop() -> Self {
        Self { on_dispose: None }
    }

    pub fn new(on_dispose: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_dispose: Some(Box::new(on_dispose)),
        }
    }

    pub fn dispose(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(on_dispose) = self.on_dispose.take() {
            on_dispose();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("on_dispose", &self.on_dispose.is_some())
            .finish()
    }
}

// ============================================================================
// VirtualFileSystem Trait
// ============================================================================

/// Operations the host dispatches to a scheme provider
#[async_trait]
pub trait VirtualFileSystem: Send + Sync {
    /// URI scheme this provider serves
    fn scheme(&self) -> &'static str;

    /// Metadata for a resource
    fn stat(&self, locator: &Locator) -> Result<FileStat>;

    /// Read the entire resource
    async fn read_file(&self, locator: &Locator) -> Result<Vec<u8>>;

    /// Write the entire resource
    async fn write_file(
        &self,
        locator: &Locator,
        content: &[u8],
        options: WriteOptions,
    ) -> Result<()>;

    fn rename(&self, from: &Locator, to: &Locator, options: RenameOptions) -> Result<()>;

    /// Subscribe to changes under a resource
    fn watch(&self, locator: &Locator, options: &WatchOptions) -> WatchHandle;

    /// List entries (non-recursive)
    fn read_directory(&self, locator: &Locator) -> Result<Vec<(String, FileType)>>;

    fn create_directory(&self, locator: &Locator) -> Result<()>;

    fn delete(&self, locator: &Locator, options: DeleteOptions) -> Result<()>;
}
