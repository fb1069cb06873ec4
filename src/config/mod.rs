//! Configuration management for the progress server.

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Command-line arguments for the progress server.
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-progress")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for desktop notifications and progress tracking")]
pub struct Args {
    /// Transport mode: stdio or http
    #[arg(short, long, default_value = "stdio", env = "MCP_PROGRESS_TRANSPORT")]
    pub transport: Transport,

    /// HTTP bind address (only for http transport)
    #[arg(long, default_value = "127.0.0.1", env = "MCP_PROGRESS_HOST")]
    pub host: String,

    /// HTTP port (only for http transport)
    #[arg(short, long, default_value = "3000", env = "MCP_PROGRESS_PORT")]
    pub port: u16,

    /// Enable debug logging
    #[arg(short, long, env = "MCP_PROGRESS_DEBUG")]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, env = "MCP_PROGRESS_JSON_LOGS")]
    pub json_logs: bool,

    /// Notification backend: desktop, log or none
    #[arg(short, long, default_value = "desktop", env = "MCP_PROGRESS_NOTIFIER")]
    pub notifier: NotifierKind,

    /// Application name shown on desktop notifications
    #[arg(long, default_value = "mcp-progress", env = "MCP_PROGRESS_APP_NAME")]
    pub app_name: String,

    /// Keep desktop notifications on screen until dismissed
    #[arg(long, env = "MCP_PROGRESS_STICKY")]
    pub sticky: bool,

    /// Seconds before a stuck notification command is killed
    #[arg(long, default_value = "10", env = "MCP_PROGRESS_NOTIFY_TIMEOUT")]
    pub notify_timeout_secs: u64,
}

/// Transport mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Stdio,
    Http,
}

/// Notification backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Native desktop notifications
    #[default]
    Desktop,
    /// Log notifications instead of showing them
    Log,
    /// Drop notifications
    None,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Transport mode
    pub transport: Transport,
    /// HTTP bind address
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// Debug mode
    pub debug: bool,
    /// JSON log output
    pub json_logs: bool,
    /// Notification backend
    pub notifier: NotifierKind,
    /// Application name for notifications
    pub app_name: String,
    /// Notifications wait for dismissal
    #[serde(default)]
    pub sticky: bool,
    /// Notification command timeout
    pub notify_timeout_secs: u64,
}

impl Config {
    /// Socket address for the HTTP transport.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            transport: args.transport,
            host: args.host,
            port: args.port,
            debug: args.debug,
            json_logs: args.json_logs,
            notifier: args.notifier,
            app_name: args.app_name,
            sticky: args.sticky,
            notify_timeout_secs: args.notify_timeout_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            host: "127.0.0.1".to_string(),
            port: 3000,
            debug: false,
            json_logs: false,
            notifier: NotifierKind::Desktop,
            app_name: crate::SERVER_NAME.to_string(),
            sticky: false,
            notify_timeout_secs: 10,
        }
    }
}
