//! Action Parsing
//!
//! Turns a raw model reply into an [`Action`]: either plain text to render
//! verbatim, or a structured tool invocation extracted from an embedded
//! JSON object of the form
//! `{"action": "use_tool", "tool": "...", "arguments": {...}}`.
//!
//! Extraction is quote- and brace-aware. A naive first-`{`-to-last-`}`
//! slice mis-extracts when the reply contains multiple objects or braces
//! inside string literals, so the scanner walks candidate objects in order
//! and takes the first one that is both syntactically valid JSON and a
//! well-formed tool invocation. Parsing never fails: anything else
//! degrades to a text action carrying the original reply.

use std::collections::HashMap;

use serde_json::Value;

use crate::tool::ToolCall;

/// The parsed interpretation of one model reply.
///
/// Exactly one variant per reply; constructed fresh each turn and consumed
/// immediately by the dispatcher.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Free-text reply, rendered verbatim
    Text { content: String },

    /// Structured tool invocation
    ToolUse(ToolCall),
}

/// Stateless parser for model replies
pub struct ActionParser;

impl ActionParser {
    /// Parse a raw model reply into an [`Action`]. Infallible.
    pub fn parse(raw: &str) -> Action {
        let mut search_from = 0;

        while let Some(offset) = raw[search_from..].find('{') {
            let start = search_from + offset;

            match balanced_object(raw, start) {
                Some(end) => {
                    let candidate = &raw[start..end];
                    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
                        if let Some(call) = tool_call_from(&value) {
                            return Action::ToolUse(call);
                        }
                        tracing::debug!(
                            "embedded JSON object is not a tool invocation, continuing scan"
                        );
                    }
                    // Candidate was balanced but not usable; resume after
                    // its opening brace so nested objects are still seen.
                    search_from = start + 1;
                }
                // No balanced object from this brace to end of input.
                None => {
                    search_from = start + 1;
                }
            }
        }

        tracing::debug!("no tool invocation found in model reply");
        Action::Text {
            content: raw.to_string(),
        }
    }
}

/// Find the end (exclusive byte index) of a balanced JSON object starting
/// at `start`, tracking string-quoting and escape state so braces inside
/// string literals do not count.
fn balanced_object(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(start + i + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

/// Interpret a parsed JSON value as a tool invocation, if it is one.
///
/// Requires `"action": "use_tool"` and a string `"tool"` field. An
/// `"arguments"` field that is missing or not an object is treated as an
/// empty argument set, not an error.
fn tool_call_from(value: &Value) -> Option<ToolCall> {
    if value.get("action").and_then(Value::as_str) != Some("use_tool") {
        return None;
    }

    let name = value.get("tool").and_then(Value::as_str)?.to_string();

    let arguments: HashMap<String, Value> = match value.get("arguments") {
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        _ => HashMap::new(),
    };

    Some(ToolCall { name, arguments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expect_tool(action: Action) -> ToolCall {
        match action {
            Action::ToolUse(call) => call,
            Action::Text { content } => panic!("expected tool action, got text: {content}"),
        }
    }

    #[test]
    fn test_plain_text_passes_through() {
        let raw = "The weather looks fine today.";
        assert_eq!(
            ActionParser::parse(raw),
            Action::Text {
                content: raw.into()
            }
        );
    }

    #[test]
    fn test_tool_call_embedded_in_prose() {
        let raw = r#"Let me look that up.
{"action": "use_tool", "tool": "search_news", "arguments": {"query": "rust"}}
One moment."#;

        let call = expect_tool(ActionParser::parse(raw));
        assert_eq!(call.name, "search_news");
        assert_eq!(call.arguments["query"], json!("rust"));
    }

    #[test]
    fn test_braces_inside_string_literals() {
        let raw = r#"{"action": "use_tool", "tool": "search_web", "arguments": {"query": "what is {x} in math?"}}"#;
        let call = expect_tool(ActionParser::parse(raw));
        assert_eq!(call.arguments["query"], json!("what is {x} in math?"));
    }

    #[test]
    fn test_nested_argument_objects() {
        let raw = r#"{"action": "use_tool", "tool": "update_config", "arguments": {"setting": "max_articles", "value": "10", "extra": {"a": {"b": 1}}}}"#;
        let call = expect_tool(ActionParser::parse(raw));
        assert_eq!(call.name, "update_config");
    }

    #[test]
    fn test_skips_earlier_non_action_object() {
        let raw = r#"Context: {"note": "irrelevant"} then
{"action": "use_tool", "tool": "get_events", "arguments": {}}"#;
        let call = expect_tool(ActionParser::parse(raw));
        assert_eq!(call.name, "get_events");
    }

    #[test]
    fn test_malformed_json_degrades_to_text() {
        // Trailing comma and unterminated string both fall back to text.
        for raw in [
            r#"{"action": "use_tool", "tool": "search_news", "arguments": {"q": "x",}}"#,
            r#"{"action": "use_tool", "tool": "search_news"#,
        ] {
            assert_eq!(
                ActionParser::parse(raw),
                Action::Text {
                    content: raw.into()
                }
            );
        }
    }

    #[test]
    fn test_missing_arguments_becomes_empty_map() {
        let raw = r#"{"action": "use_tool", "tool": "get_top_headlines"}"#;
        let call = expect_tool(ActionParser::parse(raw));
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_non_object_arguments_becomes_empty_map() {
        let raw = r#"{"action": "use_tool", "tool": "get_events", "arguments": "tomorrow"}"#;
        let call = expect_tool(ActionParser::parse(raw));
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_unknown_action_value_is_text() {
        let raw = r#"{"action": "think", "tool": "search_news"}"#;
        assert_eq!(
            ActionParser::parse(raw),
            Action::Text {
                content: raw.into()
            }
        );
    }

    #[test]
    fn test_missing_tool_field_is_text() {
        let raw = r#"{"action": "use_tool", "arguments": {"query": "x"}}"#;
        assert_eq!(
            ActionParser::parse(raw),
            Action::Text {
                content: raw.into()
            }
        );
    }
}
