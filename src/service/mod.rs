//! Service layer for the progress server.
//!
//! Holds the state and text logic the MCP tools are built on.

pub mod format;
pub mod progress;

pub use progress::{CompletedProgress, ProgressRecord, ProgressRegistry, TotalUpdate};
