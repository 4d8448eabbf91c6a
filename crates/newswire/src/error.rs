//! Error Types for the News Gateway Domain

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NewswireError>;

#[derive(Error, Debug)]
pub enum NewswireError {
    #[error("unsafe target: {0}")]
    UnsafeTarget(String),

    #[error("request timed out after {0:.1}s")]
    Timeout(f64),

    #[error("batch aborted: overall deadline exceeded")]
    BatchTimeout,

    #[error("feed parse failed: {0}")]
    Feed(String),

    #[error("invalid date format '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time format '{0}'. Use HH:MM")]
    InvalidTime(String),

    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("invalid value for {setting}: {reason}")]
    InvalidSettingValue { setting: String, reason: String },

    #[error("{0} environment variable not set")]
    MissingCredential(String),

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<NewswireError> for gateway_core::GatewayError {
    fn from(err: NewswireError) -> Self {
        use gateway_core::GatewayError;

        match err {
            NewswireError::MissingCredential(_) => GatewayError::Config(err.to_string()),
            NewswireError::UnsafeTarget(_)
            | NewswireError::InvalidDate(_)
            | NewswireError::InvalidTime(_)
            | NewswireError::UnknownSetting(_)
            | NewswireError::InvalidSettingValue { .. } => {
                GatewayError::ToolValidation(err.to_string())
            }
            NewswireError::EventNotFound(_) => GatewayError::ToolExecution(err.to_string()),
            _ => GatewayError::Remote(err.to_string()),
        }
    }
}
