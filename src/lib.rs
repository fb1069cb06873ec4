//! MCP Progress Server
//!
//! A Model Context Protocol (MCP) server that shows desktop notifications and
//! tracks the progress of long-running operations on behalf of an AI agent.
//!
//! # Architecture
//!
//! 1. **Service Layer** (`service`) - Progress registry and text formatting
//! 2. **Notifier** (`notifier`) - Desktop notification delivery
//! 3. **Tools Layer** (`tools`) - `notify` and the three progress tools
//! 4. **MCP Layer** (`mcp`) - Protocol implementation, stdio transport
//! 5. **HTTP** (`http`) - Alternative HTTP transport with metrics

pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod metrics;
pub mod notifier;
pub mod service;
pub mod tools;

pub use error::{Error, Result};

/// Server name reported to MCP clients.
pub const SERVER_NAME: &str = "mcp-progress";

/// Server version reported to MCP clients.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
