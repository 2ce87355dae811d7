// Shared fakes for provider integration tests

#![allow(dead_code)]

pub mod logging;

use async_trait::async_trait;
use spooled_fs::config::ConnectionConfig;
use spooled_fs::services::export::SaveLocationPicker;
use spooled_fs::services::notify::{NoticeLevel, Notifier};
use spooled_fs::services::remote::{SpooledFileContent, SpooledFileRequest};
use spooled_fs::SpooledFileIdentity;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Owned copy of a fetch request, for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub name: String,
    pub qualified_job_name: String,
    pub number: String,
    pub format: String,
    pub readonly: bool,
}

/// Content API returning canned text and recording every request
pub struct FakeContent {
    response: Option<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeContent {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpooledFileContent for FakeContent {
    async fn download(&self, request: &SpooledFileRequest<'_>) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedRequest {
            path: request.path.to_string(),
            name: request.name.to_string(),
            qualified_job_name: request.qualified_job_name.to_string(),
            number: request.number.to_string(),
            format: request.format.to_string(),
            readonly: request.options.readonly,
        });
        self.response.clone()
    }
}

/// Save prompt answering with a fixed choice and remembering the suggestion
pub struct FakePicker {
    choice: Option<PathBuf>,
    suggested: Mutex<Option<PathBuf>>,
}

impl FakePicker {
    pub fn choosing(path: PathBuf) -> Self {
        Self {
            choice: Some(path),
            suggested: Mutex::new(None),
        }
    }

    pub fn dismissing() -> Self {
        Self {
            choice: None,
            suggested: Mutex::new(None),
        }
    }

    pub fn suggested(&self) -> Option<PathBuf> {
        self.suggested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveLocationPicker for FakePicker {
    async fn pick_save_location(&self, suggested: &Path) -> Option<PathBuf> {
        *self.suggested.lock().unwrap() = Some(suggested.to_path_buf());
        self.choice.clone()
    }
}

/// Notifier keeping every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NoticeLevel, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

pub fn rpt01() -> SpooledFileIdentity {
    SpooledFileIdentity {
        owner: "QPGMR".to_string(),
        queue: "QPRINT".to_string(),
        name: "RPT01".to_string(),
        job_name: "BATCHJOB".to_string(),
        job_user: "QPGMR".to_string(),
        job_number: "123456".to_string(),
        number: "0001".to_string(),
    }
}

pub fn default_config() -> ConnectionConfig {
    ConnectionConfig::default()
}
