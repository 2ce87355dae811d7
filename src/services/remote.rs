//! Remote session collaborators
//!
//! The provider never talks to the remote system itself. It asks a
//! [`SessionSource`] for the active session's content API and configuration,
//! and hands the decoded identity to [`SpooledFileContent`].

use crate::config::ConnectionConfig;
use crate::model::{OpenOptions, QualifiedJobName};
use async_trait::async_trait;
use std::sync::Arc;

/// Output format requested from the remote content API
pub const FETCH_FORMAT: &str = "txt";

/// Everything the remote content API needs to download one spooled file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpooledFileRequest<'a> {
    /// Decoded locator path, including the leading `/`
    pub path: &'a str,
    pub name: &'a str,
    pub qualified_job_name: &'a QualifiedJobName,
    pub number: &'a str,
    pub format: &'static str,
    pub options: &'a OpenOptions,
}

/// Downloads spooled file content over an active session
///
/// Implementations own timeouts and retries. `None` means the content could
/// not be retrieved.
#[async_trait]
pub trait SpooledFileContent: Send + Sync {
    async fn download(&self, request: &SpooledFileRequest<'_>) -> Option<String>;
}

/// Access to the currently active remote session, if any
pub trait SessionSource: Send + Sync {
    /// Content API of the active session
    fn content(&self) -> Option<Arc<dyn SpooledFileContent>>;

    /// Configuration snapshot of the active session
    fn config(&self) -> Option<Arc<ConnectionConfig>>;
}

/// Session source with no connection
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSession;

impl SessionSource for NoSession {
    fn content(&self) -> Option<Arc<dyn SpooledFileContent>> {
        None
    }

    fn config(&self) -> Option<Arc<ConnectionConfig>> {
        None
    }
}

/// A fixed session: one content API and one configuration
#[derive(Clone)]
pub struct StaticSession {
    content: Option<Arc<dyn SpooledFileContent>>,
    config: Arc<ConnectionConfig>,
}

impl StaticSession {
    pub fn new(content: Arc<dyn SpooledFileContent>, config: ConnectionConfig) -> Self {
        Self {
            content: Some(content),
            config: Arc::new(config),
        }
    }

    /// Connected, but without a usable content API
    pub fn without_content(config: ConnectionConfig) -> Self {
        Self {
            content: None,
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for StaticSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSession")
            .field("content", &self.content.as_ref().map(|_| "<dyn SpooledFileContent>"))
            .field("config", &self.config)
            .finish()
    }
}

impl SessionSource for StaticSession {
    fn content(&self) -> Option<Arc<dyn SpooledFileContent>> {
        self.content.clone()
    }

    fn config(&self) -> Option<Arc<ConnectionConfig>> {
        Some(Arc::clone(&self.config))
    }
}
