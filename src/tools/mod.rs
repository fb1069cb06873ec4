//! MCP tool implementations.
//!
//! - `notify` - One-off desktop notification (1 tool)
//! - `progress` - Progress tracking lifecycle (3 tools)

pub mod notify;
pub mod progress;

use std::sync::Arc;

use crate::mcp::handler::McpHandler;
use crate::notifier::Notifier;
use crate::service::ProgressRegistry;

pub use progress::ProgressContext;

/// Register all tools with the handler.
pub fn register_all_tools(
    handler: &mut McpHandler,
    registry: Arc<ProgressRegistry>,
    notifier: Arc<dyn Notifier>,
) {
    handler.register(notify::NotifyTool::new(notifier.clone()));

    let ctx = ProgressContext::new(registry, notifier, handler.metrics());
    handler.register(progress::StartProgressTool::new(ctx.clone()));
    handler.register(progress::UpdateProgressTool::new(ctx.clone()));
    handler.register(progress::CompleteProgressTool::new(ctx));
}
