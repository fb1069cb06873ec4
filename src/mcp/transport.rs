//! MCP transport layer.
//!
//! Newline-delimited JSON-RPC over stdio.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, trace};

use crate::error::Result;
use crate::mcp::protocol::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};

/// A message that can be sent or received.
#[derive(Debug, Clone)]
pub enum Message {
    Request(JsonRpcRequest),
    Response(JsonRpcResponse),
    Notification(JsonRpcNotification),
}

impl Message {
    /// Parse one line of input as a request or notification.
    pub fn parse(line: &str) -> Option<Self> {
        if let Ok(req) = serde_json::from_str::<JsonRpcRequest>(line) {
            Some(Message::Request(req))
        } else if let Ok(notif) = serde_json::from_str::<JsonRpcNotification>(line) {
            Some(Message::Notification(notif))
        } else {
            None
        }
    }

    /// Serialize to a single JSON line (without the newline).
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Message::Request(req) => serde_json::to_string(req),
            Message::Response(res) => serde_json::to_string(res),
            Message::Notification(notif) => serde_json::to_string(notif),
        }
    }
}

/// Transport trait for MCP communication.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start the transport, returning channels for messages.
    async fn start(&mut self) -> Result<(mpsc::Receiver<Message>, mpsc::Sender<Message>)>;

    /// Stop the transport.
    async fn stop(&mut self) -> Result<()>;
}

/// Stdio transport for MCP.
#[derive(Debug, Default)]
pub struct StdioTransport;

impl StdioTransport {
    /// Create a new stdio transport.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn start(&mut self) -> Result<(mpsc::Receiver<Message>, mpsc::Sender<Message>)> {
        Ok(spawn_io(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        ))
    }

    async fn stop(&mut self) -> Result<()> {
        debug!("Stdio transport stopped");
        Ok(())
    }
}

/// Spawn reader and writer tasks over a line-oriented stream pair.
pub fn spawn_io<R, W>(reader: R, writer: W) -> (mpsc::Receiver<Message>, mpsc::Sender<Message>)
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    // Channel for incoming messages (from the reader)
    let (incoming_tx, incoming_rx) = mpsc::channel::<Message>(100);
    // Channel for outgoing messages (to the writer)
    let (outgoing_tx, mut outgoing_rx) = mpsc::channel::<Message>(100);

    tokio::spawn(async move {
        let mut reader = reader;
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    debug!("EOF on input, stopping transport");
                    break;
                }
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    trace!("Received: {}", trimmed);

                    match Message::parse(trimmed) {
                        Some(msg) => {
                            if incoming_tx.send(msg).await.is_err() {
                                break;
                            }
                        }
                        None => error!("Failed to parse message: {}", trimmed),
                    }
                }
                Err(e) => {
                    error!("Error reading input: {}", e);
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        let mut writer = writer;

        while let Some(msg) = outgoing_rx.recv().await {
            match msg.to_json() {
                Ok(s) => {
                    trace!("Sending: {}", s);
                    if let Err(e) = writer.write_all(s.as_bytes()).await {
                        error!("Error writing output: {}", e);
                        break;
                    }
                    if let Err(e) = writer.write_all(b"\n").await {
                        error!("Error writing newline: {}", e);
                        break;
                    }
                    if let Err(e) = writer.flush().await {
                        error!("Error flushing output: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    error!("Error serializing message: {}", e);
                }
            }
        }
    });

    (incoming_rx, outgoing_tx)
}
