//! HTTP transport for MCP tool calls.
//!
//! Provides an alternative to stdio transport for web-based clients.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::mcp::handler::McpHandler;
use crate::mcp::protocol::*;

/// HTTP server state.
#[derive(Clone)]
pub struct HttpState {
    handler: Arc<McpHandler>,
    server_info: ServerInfo,
}

impl HttpState {
    pub fn new(handler: Arc<McpHandler>) -> Self {
        Self {
            handler,
            server_info: ServerInfo::default(),
        }
    }
}

/// Build the HTTP router.
pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/mcp/initialize", post(initialize))
        .route("/mcp/tools/list", get(list_tools))
        .route("/mcp/tools/call", post(call_tool))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn start_server(config: &Config, handler: Arc<McpHandler>) -> Result<()> {
    let app = router(HttpState::new(handler));

    let addr = config.bind_addr();
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::HttpServer(e.to_string()))?;

    Ok(())
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Prometheus metrics endpoint.
async fn metrics(State(state): State<HttpState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.handler.metrics().to_prometheus(),
    )
}

/// Initialize endpoint.
async fn initialize(State(state): State<HttpState>) -> impl IntoResponse {
    state.handler.metrics().inc_requests();
    Json(InitializeResult::for_server(state.server_info))
}

/// List tools endpoint.
async fn list_tools(State(state): State<HttpState>) -> impl IntoResponse {
    state.handler.metrics().inc_requests();
    Json(ListToolsResult {
        tools: state.handler.list_tools(),
    })
}

/// Call tool request.
#[derive(Debug, Deserialize)]
struct CallToolRequest {
    name: String,
    #[serde(default)]
    arguments: HashMap<String, serde_json::Value>,
}

/// Call tool endpoint.
async fn call_tool(
    State(state): State<HttpState>,
    Json(req): Json<CallToolRequest>,
) -> impl IntoResponse {
    let metrics = state.handler.metrics();
    metrics.inc_requests();

    let outcome = state
        .handler
        .call_tool(&req.name, req.arguments)
        .await
        .and_then(|result| Ok(serde_json::to_value(result)?));

    match outcome {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => {
            warn!("Tool call {} failed: {}", req.name, e);
            metrics.inc_failed();
            let status = match e {
                Error::InvalidToolArguments(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(serde_json::json!({
                    "error": e.to_string()
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::test_mocks::RecordingNotifier;
    use crate::service::ProgressRegistry;
    use crate::tools;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let mut handler = McpHandler::new();
        tools::register_all_tools(
            &mut handler,
            Arc::new(ProgressRegistry::new()),
            Arc::new(RecordingNotifier::new()),
        );
        router(HttpState::new(Arc::new(handler)))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn call(app: &Router, body: Value) -> (StatusCode, Value) {
        let (status, body) = send(app, Method::POST, "/mcp/tools/call", Some(body)).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["version"], crate::VERSION);
    }

    #[tokio::test]
    async fn test_initialize() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/mcp/initialize", None).await;

        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["serverInfo"]["name"], "mcp-progress");
        assert_eq!(value["protocolVersion"], MCP_VERSION);
    }

    #[tokio::test]
    async fn test_progress_over_http() {
        let app = app();

        let (status, value) = call(
            &app,
            json!({
                "name": "start_progress",
                "arguments": { "progressToken": "a", "title": "Task", "total": 10 }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            value["content"][0]["text"],
            "Progress started: \"Task\" (token: a)"
        );

        let (_, value) = call(
            &app,
            json!({
                "name": "update_progress",
                "arguments": { "progressToken": "a", "current": 5 }
            }),
        )
        .await;
        assert_eq!(value["content"][0]["text"], "Progress updated: 5/10 (50%)");

        let (status, body) = send(&app, Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("mcp_progress_tool_calls 2"));
        assert!(body.contains("mcp_progress_started 1"));
    }

    #[tokio::test]
    async fn test_http_error_shapes() {
        let app = app();

        let (status, value) = call(
            &app,
            json!({ "name": "complete_progress", "arguments": { "progressToken": "ghost" } }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["text"], "Progress token \"ghost\" not found");

        let (status, value) = call(&app, json!({ "name": "notify", "arguments": {} })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(value["error"]
            .as_str()
            .unwrap()
            .contains("Missing required argument"));

        let (status, body) = send(&app, Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("mcp_progress_requests_failed 1"));
    }

    #[tokio::test]
    async fn test_list_tools_over_http() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/mcp/tools/list", None).await;

        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["tools"].as_array().unwrap().len(), 4);
    }
}
