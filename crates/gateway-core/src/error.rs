//! Error Types

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool argument validation failed
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool execution failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Remote backend call failed (network, timeout, bad status)
    #[error("Remote error: {0}")]
    Remote(String),

    /// Maximum iterations reached in the agent loop
    #[error("Maximum iterations ({0}) reached")]
    MaxIterations(usize),

    /// Parse error (e.g., action extraction)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Missing credential or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    /// Convert to a short user-facing message
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            GatewayError::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            GatewayError::ToolNotFound(name) => format!("The tool '{name}' is not available."),
            GatewayError::ToolValidation(msg) => format!("Invalid tool input: {msg}"),
            GatewayError::ToolExecution(msg) => format!("Tool error: {msg}"),
            GatewayError::Remote(msg) => format!("Backend request failed: {msg}"),
            GatewayError::Config(msg) => format!("Configuration problem: {msg}"),
            GatewayError::MaxIterations(_) => {
                "The request took too long to process. Please try a simpler query.".into()
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        GatewayError::Other(err.to_string())
    }
}
