//! Plain notification tool.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::mcp::handler::{get_bool_arg, get_string_arg, success_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};
use crate::notifier::{self, NotificationRequest, Notifier};

/// Notify tool.
pub struct NotifyTool {
    notifier: Arc<dyn Notifier>,
}

impl NotifyTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl ToolHandler for NotifyTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "notify".to_string(),
            description: "Display a notification to the user".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Notification title"
                    },
                    "message": {
                        "type": "string",
                        "description": "Notification message"
                    },
                    "sound": {
                        "type": "boolean",
                        "description": "Play notification sound (default: false)",
                        "default": false
                    }
                },
                "required": ["title", "message"]
            }),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let title = get_string_arg(&args, "title")?;
        let message = get_string_arg(&args, "message")?;
        let sound = get_bool_arg(&args, "sound", false);

        let request = NotificationRequest::new(title.clone(), message).with_sound(sound);
        notifier::dispatch(self.notifier.as_ref(), request).await;

        Ok(success_result(format!("Notification sent: \"{}\"", title)))
    }
}
