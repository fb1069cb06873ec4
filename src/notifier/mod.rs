//! Desktop notification delivery.
//!
//! Tools hand a [`NotificationRequest`] to a [`Notifier`] and never depend on
//! the outcome: delivery is one-way, and failures are only logged.
//!
//! - `desktop` - Spawns the platform notification command
//! - `log` - Writes notifications to the tracing log
//! - `none` - Discards notifications

pub mod desktop;

#[cfg(test)]
pub mod test_mocks;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{Config, NotifierKind};
use crate::error::Result;

pub use desktop::DesktopNotifier;

/// A notification to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
    /// Play the platform default sound
    pub sound: bool,
    /// Keep the notification until the user dismisses it
    pub wait: bool,
    /// Label for the dismiss action when waiting
    pub close_label: Option<String>,
}

impl NotificationRequest {
    /// Create a silent, non-blocking notification.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            sound: false,
            wait: false,
            close_label: None,
        }
    }

    /// Enable or disable the notification sound.
    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    /// Keep the notification until it is closed with `close_label`.
    pub fn sticky(mut self, close_label: impl Into<String>) -> Self {
        self.wait = true;
        self.close_label = Some(close_label.into());
        self
    }
}

/// Sink for user-facing notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Hand the notification to the delivery mechanism.
    ///
    /// Returns once the notification is dispatched, not once it is seen.
    async fn notify(&self, request: NotificationRequest) -> Result<()>;
}

/// Notifier that writes to the log instead of the desktop.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, request: NotificationRequest) -> Result<()> {
        info!(
            title = %request.title,
            sound = request.sound,
            "Notification: {}",
            request.message
        );
        Ok(())
    }
}

/// Notifier that drops everything.
#[derive(Debug, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _request: NotificationRequest) -> Result<()> {
        Ok(())
    }
}

/// Label of the dismiss action on sticky notifications.
pub const CLOSE_LABEL: &str = "Close";

/// Wraps a notifier so every notification stays until dismissed.
pub struct StickyNotifier {
    inner: Arc<dyn Notifier>,
}

impl StickyNotifier {
    pub fn new(inner: Arc<dyn Notifier>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Notifier for StickyNotifier {
    async fn notify(&self, request: NotificationRequest) -> Result<()> {
        self.inner.notify(request.sticky(CLOSE_LABEL)).await
    }
}

/// Build the notifier selected in the configuration.
pub fn from_config(config: &Config) -> Arc<dyn Notifier> {
    let notifier: Arc<dyn Notifier> = match config.notifier {
        NotifierKind::Desktop => Arc::new(DesktopNotifier::new(
            config.app_name.clone(),
            Duration::from_secs(config.notify_timeout_secs),
        )),
        NotifierKind::Log => Arc::new(LogNotifier),
        NotifierKind::None => return Arc::new(NullNotifier),
    };

    if config.sticky {
        Arc::new(StickyNotifier::new(notifier))
    } else {
        notifier
    }
}

/// Send a notification, logging instead of failing.
pub async fn dispatch(notifier: &dyn Notifier, request: NotificationRequest) {
    let title = request.title.clone();
    if let Err(e) = notifier.notify(request).await {
        warn!("Failed to deliver notification \"{}\": {}", title, e);
    }
}
