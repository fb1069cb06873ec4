//! MCP server implementation.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::mcp::handler::McpHandler;
use crate::mcp::protocol::*;
use crate::mcp::transport::{Message, Transport};
use crate::metrics::Metrics;

/// MCP server.
pub struct McpServer {
    handler: Arc<McpHandler>,
    metrics: Arc<Metrics>,
    info: ServerInfo,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(handler: McpHandler, name: impl Into<String>) -> Self {
        Self::from_shared(Arc::new(handler), name)
    }

    /// Create a server around a handler shared with another transport.
    pub fn from_shared(handler: Arc<McpHandler>, name: impl Into<String>) -> Self {
        Self {
            metrics: handler.metrics(),
            handler,
            info: ServerInfo {
                name: name.into(),
                version: crate::VERSION.to_string(),
            },
        }
    }

    /// Run the server with the given transport.
    ///
    /// Requests are handled one at a time, in arrival order.
    pub async fn run<T: Transport>(&self, mut transport: T) -> Result<()> {
        info!("Starting MCP server: {} v{}", self.info.name, self.info.version);

        let (mut incoming, outgoing) = transport.start().await?;

        while let Some(msg) = incoming.recv().await {
            match msg {
                Message::Request(req) => {
                    let response = self.handle_request(req).await;
                    if outgoing.send(Message::Response(response)).await.is_err() {
                        error!("Failed to send response");
                        break;
                    }
                }
                Message::Notification(notif) => {
                    self.handle_notification(notif).await;
                }
                Message::Response(_) => {
                    warn!("Received unexpected response");
                }
            }
        }

        transport.stop().await?;
        info!("MCP server stopped");
        Ok(())
    }

    /// Handle a JSON-RPC request.
    pub async fn handle_request(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Handling request: {} (id: {:?})", req.method, req.id);
        self.metrics.inc_requests();

        let result = match req.method.as_str() {
            "initialize" => self.handle_initialize(),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.handle_list_tools(),
            "tools/call" => self.handle_call_tool(req.params).await,
            "prompts/list" => self.handle_list_prompts(),
            _ => Err(Error::MethodNotFound(req.method.clone())),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(req.id, value),
            Err(e) => {
                warn!("Request {} failed: {}", req.method, e);
                self.metrics.inc_failed();
                JsonRpcResponse::failure(req.id, e.jsonrpc_code(), e.to_string())
            }
        }
    }

    /// Handle a notification.
    async fn handle_notification(&self, notif: JsonRpcNotification) {
        debug!("Handling notification: {}", notif.method);

        match notif.method.as_str() {
            "notifications/initialized" => {
                info!("Client initialized");
            }
            "notifications/cancelled" => {
                // Requests run to completion; nothing to abort
                info!("Client cancelled a request: {:?}", notif.params);
            }
            _ => {
                debug!("Unknown notification: {}", notif.method);
            }
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&self) -> Result<Value> {
        let result = InitializeResult::for_server(self.info.clone());
        Ok(serde_json::to_value(result)?)
    }

    /// Handle list tools request.
    fn handle_list_tools(&self) -> Result<Value> {
        let result = ListToolsResult {
            tools: self.handler.list_tools(),
        };
        Ok(serde_json::to_value(result)?)
    }

    /// Handle list prompts request.
    fn handle_list_prompts(&self) -> Result<Value> {
        Ok(serde_json::to_value(ListPromptsResult::default())?)
    }

    /// Handle call tool request.
    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value> {
        let params: CallToolParams = params
            .ok_or_else(|| Error::InvalidToolArguments("Missing params".to_string()))
            .and_then(|v| {
                serde_json::from_value(v).map_err(|e| Error::InvalidToolArguments(e.to_string()))
            })?;

        let result = self
            .handler
            .call_tool(&params.name, params.arguments)
            .await?;
        Ok(serde_json::to_value(result)?)
    }
}
