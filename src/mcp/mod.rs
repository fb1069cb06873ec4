//! Model Context Protocol (MCP) implementation.
//!
//! - `protocol` - Core MCP types and message definitions
//! - `server` - MCP server implementation
//! - `transport` - Stdio transport
//! - `handler` - Tool registration and dispatch

pub mod handler;
pub mod protocol;
pub mod server;
pub mod transport;

pub use handler::McpHandler;
pub use protocol::*;
pub use server::McpServer;
pub use transport::{StdioTransport, Transport};
