pub mod filesystem;
pub mod identity;
pub mod locator;

pub use filesystem::{FilePermission, FileStat, FileType, VirtualFileSystem, WatchHandle};
pub use identity::{QualifiedJobName, SpooledFileIdentity, SplfKey};
pub use locator::{DecodedIdentity, Locator, OpenOptions, SCHEME};
