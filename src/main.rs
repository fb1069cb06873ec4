//! MCP Progress Server
//!
//! Desktop notifications and progress tracking for AI agents over MCP.

use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_progress::config::{Args, Config, Transport};
use mcp_progress::error::{Error, Result};
use mcp_progress::mcp::handler::McpHandler;
use mcp_progress::mcp::server::McpServer;
use mcp_progress::mcp::transport::StdioTransport;
use mcp_progress::service::ProgressRegistry;
use mcp_progress::{notifier, tools, SERVER_NAME, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config: Config = args.into();

    init_logging(&config)?;

    info!("MCP Progress Server v{}", VERSION);
    info!("Transport: {:?}", config.transport);
    info!("Notifier: {:?}", config.notifier);

    let registry = Arc::new(ProgressRegistry::new());
    let notifier = notifier::from_config(&config);

    // Create MCP handler and register tools
    let mut handler = McpHandler::new();
    tools::register_all_tools(&mut handler, registry.clone(), notifier);
    info!("Registered {} MCP tools", handler.tool_count());

    match config.transport {
        Transport::Stdio => {
            info!("Starting stdio transport...");
            let server = McpServer::new(handler, SERVER_NAME);
            server.run(StdioTransport::new()).await?;
        }
        Transport::Http => {
            info!("Starting HTTP transport on {}...", config.bind_addr());
            mcp_progress::http::start_server(&config, Arc::new(handler)).await?;
        }
    }

    if !registry.is_empty() {
        info!("{} progress operations were never completed", registry.len());
    }

    Ok(())
}

/// Log to stderr; stdout carries the protocol.
fn init_logging(config: &Config) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| Error::Config(format!("Failed to set tracing subscriber: {}", e)))
}
