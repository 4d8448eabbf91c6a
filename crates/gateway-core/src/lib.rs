//! # gateway-core
//!
//! Core of the conversational gateway: turns free-form model replies into
//! structured actions and routes them against a fixed tool catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Agent loop                            │
//! │  ┌──────────────┐  ┌────────────┐  ┌──────────────────────┐  │
//! │  │ ActionParser │──│ Dispatcher │──│ ToolRegistry         │  │
//! │  └──────────────┘  └────────────┘  └──────────────────────┘  │
//! │          │                                                   │
//! │  ┌──────────────┐                                            │
//! │  │ LlmProvider  │  (Strategy — Ollama or any other backend)  │
//! │  └──────────────┘                                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The model reply is either prose (rendered verbatim) or a single embedded
//! JSON object `{"action": "use_tool", "tool": ..., "arguments": {...}}`.
//! Parsing never fails: anything that is not a well-formed tool invocation
//! degrades to a plain text action.

pub mod action;
pub mod agent;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod provider;
pub mod session;
pub mod tool;

pub use action::{Action, ActionParser};
pub use agent::{Agent, AgentBuilder, AgentConfig};
pub use dispatch::{DispatchOutcome, Dispatcher, ErrorKind, ErrorReport};
pub use error::{GatewayError, Result};
pub use message::{Conversation, Message, Role};
pub use provider::LlmProvider;
pub use session::{Session, SessionId};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
