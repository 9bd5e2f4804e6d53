use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use soundgrab_core::{Blob, ObjectUrl, SaveError, SaveHost, SavedTrack};

/// Observable step taken by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Create { url: String, bytes: usize },
    Trigger { url: String, filename: String },
    Revoke { url: String },
}

/// In-memory save host that records every call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
    payloads: Mutex<Vec<(String, Vec<u8>)>>,
    next_id: AtomicU64,
    fail_trigger: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_trigger() -> Self {
        Self {
            fail_trigger: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    pub fn live_references(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    fn record(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl SaveHost for RecordingHost {
    async fn create_object_url(&self, blob: Blob) -> Result<ObjectUrl, SaveError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let url = format!("blob:test/{id}");
        self.record(HostEvent::Create {
            url: url.clone(),
            bytes: blob.len(),
        });
        self.payloads
            .lock()
            .unwrap()
            .push((url.clone(), blob.data().to_vec()));
        Ok(ObjectUrl::new(url))
    }

    async fn trigger_download(
        &self,
        url: &ObjectUrl,
        filename: &str,
    ) -> Result<SavedTrack, SaveError> {
        self.record(HostEvent::Trigger {
            url: url.as_str().to_string(),
            filename: filename.to_string(),
        });
        if self.fail_trigger {
            return Err(SaveError::io(
                filename,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        let bytes = self
            .payloads
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u == url.as_str())
            .map(|(_, data)| data.len() as u64)
            .ok_or_else(|| SaveError::unknown_object_url(url.as_str()))?;
        Ok(SavedTrack {
            filename: filename.to_string(),
            location: PathBuf::from(filename),
            bytes,
        })
    }

    async fn revoke_object_url(&self, url: ObjectUrl) {
        self.record(HostEvent::Revoke {
            url: url.as_str().to_string(),
        });
        self.payloads
            .lock()
            .unwrap()
            .retain(|(u, _)| u != url.as_str());
    }
}
