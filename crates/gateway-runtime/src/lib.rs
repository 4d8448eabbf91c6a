//! # gateway-runtime
//!
//! Runtime LLM providers for the newswire gateway.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gateway_runtime::OllamaProvider;
//!
//! let provider = OllamaProvider::from_env();
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::OllamaProvider;

// Re-export core types for convenience
pub use gateway_core::{
    Agent, GatewayError, LlmProvider, Message, Result, Role, Session, Tool, ToolRegistry,
};
