//! Calendar Tools
//!
//! `add_event`, `get_events`, and `delete_event`, sharing one
//! [`EventBook`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use gateway_core::{
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema, tool::ParameterSpec,
};

use crate::calendar::{EventBook, NewEvent};

const DEFAULT_DAYS_AHEAD: i64 = 7;

/// Tool for adding a calendar event
pub struct AddEventTool {
    book: Arc<EventBook>,
}

impl AddEventTool {
    pub fn new(book: Arc<EventBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Tool for AddEventTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "add_event".into(),
            description: "Add an event to the calendar.".into(),
            parameters: vec![
                ParameterSpec::required("title", "string", "Event title"),
                ParameterSpec::required("date", "string", "Event date (YYYY-MM-DD)"),
                ParameterSpec::optional("description", "string", "Event description"),
                ParameterSpec::optional("time", "string", "Event time (HH:MM)"),
                ParameterSpec::optional("location", "string", "Event location"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let new = NewEvent {
            title: call.str_arg("title").unwrap_or_default().to_string(),
            date: call.str_arg("date").unwrap_or_default().to_string(),
            description: call.str_arg("description").unwrap_or_default().to_string(),
            time: call.str_arg("time").unwrap_or_default().to_string(),
            location: call.str_arg("location").unwrap_or_default().to_string(),
        };

        let event = self.book.add(new)?;

        let output = format!("Added event '{}' on {} (id {})", event.title, event.date, event.id);
        let data = json!({ "success": true, "event": event });
        Ok(ToolResult::success("add_event", output).with_data(data))
    }
}

/// Tool for listing calendar events
pub struct GetEventsTool {
    book: Arc<EventBook>,
}

impl GetEventsTool {
    pub fn new(book: Arc<EventBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Tool for GetEventsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_events".into(),
            description: "List calendar events for a date, or the upcoming window.".into(),
            parameters: vec![
                ParameterSpec::optional("date", "string", "Exact date to list (YYYY-MM-DD)"),
                ParameterSpec::optional("days_ahead", "number", "Window size in days (default 7)"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let date = call.str_arg("date");
        let days_ahead = call.int_arg("days_ahead").unwrap_or(DEFAULT_DAYS_AHEAD);

        let events = self.book.query(date, days_ahead)?;

        let mut output = format!("Found {} events", events.len());
        for event in &events {
            let time = if event.time.is_empty() { "--:--" } else { &event.time };
            output.push_str(&format!("\n  {} {} - {}", event.date, time, event.title));
        }

        let data = json!({ "events": events, "total_count": events.len() });
        Ok(ToolResult::success("get_events", output).with_data(data))
    }
}

/// Tool for deleting a calendar event
pub struct DeleteEventTool {
    book: Arc<EventBook>,
}

impl DeleteEventTool {
    pub fn new(book: Arc<EventBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Tool for DeleteEventTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_event".into(),
            description: "Delete a calendar event by id.".into(),
            parameters: vec![ParameterSpec::required("event_id", "string", "Event id to delete")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let event_id = call.str_arg("event_id").ok_or_else(|| {
            gateway_core::GatewayError::ToolValidation("event_id must be a string".into())
        })?;

        let deleted = self.book.remove(event_id)?;

        let output = format!("Deleted event '{}' (id {})", deleted.title, deleted.id);
        let data = json!({ "success": true, "deleted_event": deleted });
        Ok(ToolResult::success("delete_event", output).with_data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_core::{
        Action, Conversation, DispatchOutcome, Dispatcher, ErrorKind, GatewayError, ToolRegistry,
    };
    use serde_json::json;

    fn book() -> Arc<EventBook> {
        Arc::new(EventBook::new())
    }

    #[tokio::test]
    async fn test_add_then_get_round_trip() {
        let book = book();
        let add = AddEventTool::new(Arc::clone(&book));
        let get = GetEventsTool::new(Arc::clone(&book));

        let call = ToolCall::new("add_event")
            .with_arg("title", json!("Standup"))
            .with_arg("date", json!("2025-03-01"))
            .with_arg("time", json!("09:00"));
        let added = add.execute(&call).await.unwrap();
        assert!(added.success);

        let call = ToolCall::new("get_events").with_arg("date", json!("2025-03-01"));
        let listed = get.execute(&call).await.unwrap();

        assert!(listed.output.contains("Found 1 events"));
        assert_eq!(listed.data.unwrap()["total_count"], json!(1));
    }

    #[tokio::test]
    async fn test_add_event_invalid_date_is_validation_error() {
        let add = AddEventTool::new(book());

        let call = ToolCall::new("add_event")
            .with_arg("title", json!("Bad"))
            .with_arg("date", json!("March 1st"));
        let err = add.execute(&call).await.unwrap_err();

        assert!(matches!(err, GatewayError::ToolValidation(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_keeps_events() {
        let book = book();
        let add = AddEventTool::new(Arc::clone(&book));
        let delete = DeleteEventTool::new(Arc::clone(&book));

        let call = ToolCall::new("add_event")
            .with_arg("title", json!("Keep"))
            .with_arg("date", json!("2025-03-01"));
        add.execute(&call).await.unwrap();

        let call = ToolCall::new("delete_event").with_arg("event_id", json!("event_42_0"));
        let err = delete.execute(&call).await.unwrap_err();

        assert!(matches!(err, GatewayError::ToolExecution(_)));
        assert_eq!(book.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_without_id_is_rejected_before_touching_the_book() {
        let book = book();
        let add = AddEventTool::new(Arc::clone(&book));

        let call = ToolCall::new("add_event")
            .with_arg("title", json!("Keep"))
            .with_arg("date", json!("2025-03-01"));
        add.execute(&call).await.unwrap();

        let mut registry = ToolRegistry::new();
        registry.register(DeleteEventTool::new(Arc::clone(&book)));
        let dispatcher = Dispatcher::new(Arc::new(registry));

        let mut conv = Conversation::new();
        let outcome = dispatcher
            .execute(Action::ToolUse(ToolCall::new("delete_event")), &mut conv)
            .await;

        match outcome {
            DispatchOutcome::Error(report) => assert_eq!(report.kind, ErrorKind::Validation),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(book.len(), 1);
        assert!(conv.is_empty());
    }

    #[tokio::test]
    async fn test_delete_existing_event() {
        let book = book();
        let add = AddEventTool::new(Arc::clone(&book));
        let delete = DeleteEventTool::new(Arc::clone(&book));

        let call = ToolCall::new("add_event")
            .with_arg("title", json!("Gone"))
            .with_arg("date", json!("2025-03-01"));
        let added = add.execute(&call).await.unwrap();
        let id = added.data.unwrap()["event"]["id"].as_str().unwrap().to_string();

        let call = ToolCall::new("delete_event").with_arg("event_id", json!(id));
        let deleted = delete.execute(&call).await.unwrap();

        assert!(deleted.success);
        assert!(book.is_empty());
    }
}
