//! Spooled files as virtual files
//!
//! Remote spooled files are addressed by flat `spooledfile:` locators (see
//! [`model::locator`]) and served to a host through the
//! [`VirtualFileSystem`](model::VirtualFileSystem) contract by
//! [`SplfFileSystem`](provider::SplfFileSystem).

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod services;

pub use error::{FsError, Result};
pub use model::{Locator, OpenOptions, SpooledFileIdentity};
pub use provider::SplfFileSystem;
