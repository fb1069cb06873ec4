//! Notifier doubles for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{NotificationRequest, Notifier};
use crate::error::{Error, Result};

/// Records every notification it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<NotificationRequest>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<NotificationRequest> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, request: NotificationRequest) -> Result<()> {
        self.sent.lock().unwrap().push(request);
        Ok(())
    }
}

/// Fails every delivery.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _request: NotificationRequest) -> Result<()> {
        Err(Error::Notification("notification daemon unavailable".to_string()))
    }
}
