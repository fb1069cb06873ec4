//! Progress tracking tools.
//!
//! `start_progress`, `update_progress` and `complete_progress` share one
//! [`ProgressRegistry`] and mirror every change as a desktop notification.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::mcp::handler::{
    error_result, get_number_arg, get_optional_number_arg, get_optional_string_arg,
    get_string_arg, success_result, ToolHandler,
};
use crate::mcp::protocol::{Tool, ToolResult};
use crate::metrics::Metrics;
use crate::notifier::{self, NotificationRequest, Notifier};
use crate::service::format::{
    effective_total, format_number, format_percentage_string, format_progress_text,
};
use crate::service::{ProgressRegistry, TotalUpdate};

/// Dependencies shared by the progress tools.
#[derive(Clone)]
pub struct ProgressContext {
    pub registry: Arc<ProgressRegistry>,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Arc<Metrics>,
}

impl ProgressContext {
    pub fn new(
        registry: Arc<ProgressRegistry>,
        notifier: Arc<dyn Notifier>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            registry,
            notifier,
            metrics,
        }
    }
}

/// Non-empty message, if any.
fn non_empty(message: &Option<String>) -> Option<&str> {
    message.as_deref().filter(|m| !m.is_empty())
}

/// Start progress tool.
pub struct StartProgressTool {
    ctx: ProgressContext,
}

impl StartProgressTool {
    pub fn new(ctx: ProgressContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ToolHandler for StartProgressTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "start_progress".to_string(),
            description: "Start tracking progress for a long-running operation".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "progressToken": {
                        "type": "string",
                        "description": "Unique identifier for this progress operation"
                    },
                    "title": {
                        "type": "string",
                        "description": "Title of the operation"
                    },
                    "total": {
                        "type": "number",
                        "description": "Total number of steps (optional)"
                    }
                },
                "required": ["progressToken", "title"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let token = get_string_arg(&args, "progressToken")?;
        let title = get_string_arg(&args, "title")?;
        let total = get_optional_number_arg(&args, "total")?;

        let record = match self.ctx.registry.start(&token, title, total) {
            Ok(record) => record,
            Err(e) => return Ok(error_result(e.to_string())),
        };
        self.ctx.metrics.inc_progress_started();
        info!("Progress started: {} ({})", token, record.title);

        let request =
            NotificationRequest::new(record.title.clone(), format_progress_text(0.0, total));
        notifier::dispatch(self.ctx.notifier.as_ref(), request).await;

        Ok(success_result(format!(
            "Progress started: \"{}\" (token: {})",
            record.title, token
        )))
    }
}

/// Update progress tool.
pub struct UpdateProgressTool {
    ctx: ProgressContext,
}

impl UpdateProgressTool {
    pub fn new(ctx: ProgressContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ToolHandler for UpdateProgressTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "update_progress".to_string(),
            description: "Update progress for an ongoing operation".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "progressToken": {
                        "type": "string",
                        "description": "Progress operation identifier"
                    },
                    "current": {
                        "type": "number",
                        "description": "Current progress value"
                    },
                    "total": {
                        "type": "number",
                        "description": "Total progress value (optional, updates total if provided)"
                    },
                    "message": {
                        "type": "string",
                        "description": "Progress message (optional)"
                    }
                },
                "required": ["progressToken", "current"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let token = get_string_arg(&args, "progressToken")?;
        let current = get_number_arg(&args, "current")?;
        // A supplied total always overwrites, even 0 or null
        let total = if args.contains_key("total") {
            TotalUpdate::Set(get_optional_number_arg(&args, "total")?)
        } else {
            TotalUpdate::Keep
        };
        let message = get_optional_string_arg(&args, "message")?;

        let record = match self
            .ctx
            .registry
            .update(&token, current, total, message.clone())
        {
            Ok(record) => record,
            Err(e) => return Ok(error_result(e.to_string())),
        };

        let progress_text = format_progress_text(current, record.total);
        let notification_message = match non_empty(&message) {
            Some(m) => format!("{} - {}", progress_text, m),
            None => progress_text,
        };
        let request = NotificationRequest::new(record.title.clone(), notification_message);
        notifier::dispatch(self.ctx.notifier.as_ref(), request).await;

        let mut text = format!("Progress updated: {}", format_number(current));
        if let Some(total) = effective_total(record.total) {
            text.push('/');
            text.push_str(&format_number(total));
        }
        text.push_str(&format_percentage_string(current, record.total));
        if let Some(m) = non_empty(&message) {
            text.push_str(" - ");
            text.push_str(m);
        }

        Ok(success_result(text))
    }
}

/// Complete progress tool.
pub struct CompleteProgressTool {
    ctx: ProgressContext,
}

impl CompleteProgressTool {
    pub fn new(ctx: ProgressContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ToolHandler for CompleteProgressTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "complete_progress".to_string(),
            description: "Mark a progress operation as complete".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "progressToken": {
                        "type": "string",
                        "description": "Progress operation identifier"
                    },
                    "message": {
                        "type": "string",
                        "description": "Completion message (optional)"
                    }
                },
                "required": ["progressToken"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let token = get_string_arg(&args, "progressToken")?;
        let message = get_optional_string_arg(&args, "message")?;

        let completed = match self.ctx.registry.complete(&token) {
            Ok(completed) => completed,
            Err(e) => return Ok(error_result(e.to_string())),
        };
        self.ctx.metrics.inc_progress_completed();

        let title = completed.record.title;
        let duration = completed.duration;
        info!("Progress completed: {} ({}s)", token, duration);

        let notification_message = match non_empty(&message) {
            Some(m) => m.to_string(),
            None => format!("Completed in {}s", duration),
        };
        let request = NotificationRequest::new(format!("✓ {}", title), notification_message)
            .with_sound(true);
        notifier::dispatch(self.ctx.notifier.as_ref(), request).await;

        let mut text = format!("Progress completed: \"{}\" ({}s)", title, duration);
        if let Some(m) = non_empty(&message) {
            text.push_str(" - ");
            text.push_str(m);
        }

        Ok(success_result(text))
    }
}
