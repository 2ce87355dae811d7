//! User-facing notifications
//!
//! Export outcomes are reported to the user rather than returned as errors.
//! Hosts plug their own notification UI in through [`Notifier`].

/// Severity of a user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Sends notifications to the log when no host UI is attached
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(target: "spooled_fs::notice", "{message}"),
            NoticeLevel::Error => tracing::error!(target: "spooled_fs::notice", "{message}"),
        }
    }
}
