//! MCP tool handlers and dispatch.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::mcp::protocol::{ContentBlock, Tool, ToolResult};
use crate::metrics::Metrics;

/// Handler for MCP tool calls.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the tool definition.
    fn definition(&self) -> Tool;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: HashMap<String, Value>) -> Result<ToolResult>;
}

/// Registry of tool handlers.
pub struct McpHandler {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
    metrics: Arc<Metrics>,
}

impl McpHandler {
    /// Create a new handler registry.
    pub fn new() -> Self {
        Self::with_metrics(Metrics::new())
    }

    /// Create a handler registry that counts calls into `metrics`.
    pub fn with_metrics(metrics: Arc<Metrics>) -> Self {
        Self {
            tools: HashMap::new(),
            metrics,
        }
    }

    /// Register a tool handler.
    pub fn register<T: ToolHandler + 'static>(&mut self, handler: T) {
        let tool = handler.definition();
        self.tools.insert(tool.name.clone(), Arc::new(handler));
    }

    /// Get all registered tools, sorted by name.
    pub fn list_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self.tools.values().map(|h| h.definition()).collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Get a tool by name.
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.get(name).cloned()
    }

    /// Get the number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Metrics shared with the transports.
    pub fn metrics(&self) -> Arc<Metrics> {
        self.metrics.clone()
    }

    /// Route a tool call by name.
    ///
    /// An unknown name yields an error result rather than an `Err`; argument
    /// validation failures are returned as `Err`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: HashMap<String, Value>,
    ) -> Result<ToolResult> {
        self.metrics.inc_tool_calls();

        let Some(tool) = self.get_tool(name) else {
            warn!("Unknown tool requested: {}", name);
            self.metrics.inc_tool_errors();
            return Ok(error_result(format!("Unknown tool: {}", name)));
        };

        debug!("Calling tool {}", name);
        let result = tool.execute(arguments).await;
        match &result {
            Ok(r) if r.is_error => self.metrics.inc_tool_errors(),
            Err(_) => self.metrics.inc_tool_errors(),
            Ok(_) => {}
        }
        result
    }
}

impl Default for McpHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to create a text content block.
pub fn text_content(text: impl Into<String>) -> ContentBlock {
    ContentBlock::Text { text: text.into() }
}

/// Helper to create a successful tool result.
pub fn success_result(text: impl Into<String>) -> ToolResult {
    ToolResult {
        content: vec![text_content(text)],
        is_error: false,
    }
}

/// Helper to create an error tool result.
pub fn error_result(text: impl Into<String>) -> ToolResult {
    ToolResult {
        content: vec![text_content(text)],
        is_error: true,
    }
}

fn missing(name: &str) -> Error {
    Error::InvalidToolArguments(format!("Missing required argument: {}", name))
}

fn wrong_type(name: &str, expected: &str) -> Error {
    Error::InvalidToolArguments(format!("Argument {} must be a {}", name, expected))
}

/// Helper to extract a required string argument.
pub fn get_string_arg(args: &HashMap<String, Value>, name: &str) -> Result<String> {
    match args.get(name) {
        None | Some(Value::Null) => Err(missing(name)),
        Some(v) => v
            .as_str()
            .map(String::from)
            .ok_or_else(|| wrong_type(name, "string")),
    }
}

/// Helper to extract an optional string argument.
///
/// Returns `Ok(None)` when absent or null and `Err` when present with a
/// non-string value.
pub fn get_optional_string_arg(
    args: &HashMap<String, Value>,
    name: &str,
) -> Result<Option<String>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| wrong_type(name, "string")),
    }
}

/// Helper to extract a required number argument.
pub fn get_number_arg(args: &HashMap<String, Value>, name: &str) -> Result<f64> {
    match args.get(name) {
        None | Some(Value::Null) => Err(missing(name)),
        Some(v) => v.as_f64().ok_or_else(|| wrong_type(name, "number")),
    }
}

/// Helper to extract an optional number argument.
///
/// Returns `Ok(None)` when absent or null and `Err` when present with a
/// non-numeric value.
pub fn get_optional_number_arg(args: &HashMap<String, Value>, name: &str) -> Result<Option<f64>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or_else(|| wrong_type(name, "number")),
    }
}

/// Helper to extract a boolean argument with a default.
pub fn get_bool_arg(args: &HashMap<String, Value>, name: &str, default: bool) -> bool {
    args.get(name).and_then(|v| v.as_bool()).unwrap_or(default)
}
