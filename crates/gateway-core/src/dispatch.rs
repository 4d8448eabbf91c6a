//! Action Dispatch
//!
//! Executes a parsed [`Action`] against the tool registry, mutating the
//! conversation and producing either a presentable result or a structured
//! error. The dispatcher is invoked serially, once per turn, within a
//! session, so it holds no locks; its side effects are confined to the
//! conversation plus the single backend call a tool performs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::action::Action;
use crate::error::GatewayError;
use crate::message::{Conversation, Message};
use crate::tool::{ToolCall, ToolRegistry, ToolResult};

/// Error taxonomy surfaced to the presenter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unparseable or absent action JSON (degrades to text upstream)
    Parse,
    /// Missing or invalid required tool argument; backend not contacted
    Validation,
    /// Tool name outside the catalog; backend not contacted
    UnknownTool,
    /// Network/backend failure for one tool call; isolated
    Remote,
    /// Missing credential or invalid configuration
    Config,
}

/// Structured, non-fatal error returned from dispatch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorReport {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The `{"error": ...}` shape the presenter relies on
    pub fn to_json(&self) -> serde_json::Value {
        json!({ "error": self.message })
    }
}

/// Outcome of dispatching one action
#[derive(Clone, Debug)]
pub enum DispatchOutcome {
    /// Plain assistant reply, rendered verbatim
    Text(String),
    /// Successful tool execution
    Tool(ToolResult),
    /// Structured failure; the session remains usable
    Error(ErrorReport),
}

/// Routes actions to backend operations through the registry
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute an action, mutating the conversation.
    pub async fn execute(
        &self,
        action: Action,
        conversation: &mut Conversation,
    ) -> DispatchOutcome {
        match action {
            Action::Text { content } => {
                conversation.push(Message::assistant(&content));
                DispatchOutcome::Text(content)
            }
            Action::ToolUse(call) => self.execute_tool(&call, conversation).await,
        }
    }

    async fn execute_tool(
        &self,
        call: &ToolCall,
        conversation: &mut Conversation,
    ) -> DispatchOutcome {
        let Some(tool) = self.registry.get(&call.name) else {
            tracing::warn!(tool = %call.name, "unknown tool requested");
            conversation.push(Message::assistant(format!(
                "[Attempted to use unknown tool '{}']",
                call.name
            )));
            return DispatchOutcome::Error(ErrorReport::new(
                ErrorKind::UnknownTool,
                format!("Tool not found: {}", call.name),
            ));
        };

        // Validate before touching any backend.
        if let Err(e) = tool.validate(call) {
            tracing::debug!(tool = %call.name, error = %e, "tool validation failed");
            return DispatchOutcome::Error(ErrorReport::new(ErrorKind::Validation, e.to_string()));
        }

        let summary = call_summary(call);
        match tool.execute(call).await {
            Ok(result) => {
                conversation.push(Message::assistant(&summary));
                DispatchOutcome::Tool(result)
            }
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "tool execution failed");
                // The summary still lands so the conversation stays coherent.
                conversation.push(Message::assistant(&summary));
                let kind = match e {
                    GatewayError::Config(_) => ErrorKind::Config,
                    GatewayError::ToolValidation(_) => ErrorKind::Validation,
                    _ => ErrorKind::Remote,
                };
                DispatchOutcome::Error(ErrorReport::new(kind, e.to_string()))
            }
        }
    }
}

/// Short summary (tool name + arguments, never the full payload)
fn call_summary(call: &ToolCall) -> String {
    let args = serde_json::to_string(&call.arguments).unwrap_or_else(|_| "{}".into());
    format!("[Called tool '{}' with arguments {}]", call.name, args)
}
