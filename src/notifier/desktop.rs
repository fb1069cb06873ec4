//! Desktop notifications through the platform notification command.
//!
//! Linux and the BSDs use `notify-send`, macOS uses `osascript`.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{NotificationRequest, Notifier};
use crate::error::{Error, Result};

/// Freedesktop sound theme name used when a sound is requested.
const LINUX_SOUND_NAME: &str = "message-new-instant";

/// Notifier that shows native desktop notifications.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    /// How long a non-waiting notification command may run before it is killed.
    command_timeout: Duration,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>, command_timeout: Duration) -> Self {
        Self {
            app_name: app_name.into(),
            command_timeout,
        }
    }

    /// Build the notification command for the current platform.
    fn command(&self, request: &NotificationRequest) -> Result<Command> {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("osascript");
            cmd.arg("-e").arg(osascript_script(request));
            Ok(cmd)
        } else if cfg!(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        )) {
            let mut cmd = Command::new("notify-send");
            cmd.args(notify_send_args(&self.app_name, request));
            Ok(cmd)
        } else {
            Err(Error::UnsupportedPlatform(std::env::consts::OS.to_string()))
        }
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, request: NotificationRequest) -> Result<()> {
        let mut cmd = self.command(&request)?;
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::Notification(format!("failed to spawn notifier: {}", e)))?;

        // Reap the child in the background; a waiting notification may stay
        // open until the user closes it.
        let limit = (!request.wait).then_some(self.command_timeout);
        let title = request.title;
        tokio::spawn(async move {
            let status = match limit {
                Some(limit) => match timeout(limit, child.wait()).await {
                    Ok(status) => status,
                    Err(_) => {
                        warn!("Notification command for \"{}\" timed out", title);
                        let _ = child.kill().await;
                        return;
                    }
                },
                None => child.wait().await,
            };

            match status {
                Ok(status) if status.success() => {
                    debug!("Delivered notification \"{}\"", title);
                }
                Ok(status) => {
                    warn!("Notification command for \"{}\" exited with {}", title, status);
                }
                Err(e) => {
                    warn!("Failed to wait for notification command: {}", e);
                }
            }
        });

        Ok(())
    }
}

/// Arguments for `notify-send`.
fn notify_send_args(app_name: &str, request: &NotificationRequest) -> Vec<String> {
    let mut args = vec!["--app-name".to_string(), app_name.to_string()];

    if request.sound {
        args.push(format!("--hint=string:sound-name:{}", LINUX_SOUND_NAME));
    }
    if request.wait {
        args.push("--wait".to_string());
        if let Some(label) = &request.close_label {
            args.push(format!("--action=close={}", label));
        }
    }

    // Titles may start with '-'
    args.push("--".to_string());
    args.push(request.title.clone());
    args.push(request.message.clone());
    args
}

/// AppleScript for `osascript -e`.
fn osascript_script(request: &NotificationRequest) -> String {
    let mut script = format!(
        "display notification {} with title {}",
        applescript_string(&request.message),
        applescript_string(&request.title)
    );
    if request.sound {
        script.push_str(" sound name \"default\"");
    }
    script
}

/// Quote a string as an AppleScript literal.
fn applescript_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
