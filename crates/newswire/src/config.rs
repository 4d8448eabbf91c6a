//! Runtime Configuration
//!
//! Explicitly owned configuration context passed into each tool at wiring
//! time. There is no ambient global state: the wiring layer owns one
//! [`SharedConfig`] and hands clones of the handle to the tools that need
//! it. Persistence to disk is a collaborator concern, not handled here.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{NewswireError, Result};

/// Settings that `update_config` may touch
pub const UPDATABLE_SETTINGS: &[&str] = &[
    "default_country",
    "default_language",
    "max_articles",
    "api_timeout",
    "max_concurrent_requests",
];

/// Gateway runtime configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Country code for headline defaults
    pub default_country: String,

    /// Language code for news search defaults
    pub default_language: String,

    /// Default page size for article queries
    pub max_articles: u32,

    /// Feeds fetched by the default aggregation surface
    pub default_rss_feeds: Vec<String>,

    /// Per-request timeout in seconds
    pub api_timeout: f64,

    /// Concurrency cap for multi-source fetches
    pub max_concurrent_requests: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            default_country: "us".into(),
            default_language: "en".into(),
            max_articles: 20,
            default_rss_feeds: vec![
                "https://feeds.bbci.co.uk/news/rss.xml".into(),
                "https://rss.cnn.com/rss/edition.rss".into(),
            ],
            api_timeout: 30.0,
            max_concurrent_requests: 5,
        }
    }
}

/// Record of one applied configuration change
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigDelta {
    pub setting: String,
    pub old_value: Value,
    pub new_value: Value,
}

impl GatewayConfig {
    /// Per-request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.api_timeout.max(0.0))
    }

    /// Apply one allow-listed setting change, coercing numeric values.
    pub fn apply_update(&mut self, setting: &str, value: &str) -> Result<ConfigDelta> {
        if !UPDATABLE_SETTINGS.contains(&setting) {
            return Err(NewswireError::UnknownSetting(setting.into()));
        }

        let old_value = self.setting_value(setting);

        match setting {
            "default_country" => self.default_country = value.into(),
            "default_language" => self.default_language = value.into(),
            "max_articles" => {
                let n = parse_positive_int(setting, value)?;
                self.max_articles = u32::try_from(n).map_err(|_| out_of_range(setting))?;
            }
            "max_concurrent_requests" => {
                let n = parse_positive_int(setting, value)?;
                self.max_concurrent_requests =
                    usize::try_from(n).map_err(|_| out_of_range(setting))?;
            }
            "api_timeout" => {
                let secs: f64 =
                    value
                        .parse()
                        .map_err(|_| NewswireError::InvalidSettingValue {
                            setting: setting.into(),
                            reason: "must be numeric".into(),
                        })?;
                if secs <= 0.0 {
                    return Err(NewswireError::InvalidSettingValue {
                        setting: setting.into(),
                        reason: "must be positive".into(),
                    });
                }
                self.api_timeout = secs;
            }
            _ => unreachable!("allow-list checked above"),
        }

        Ok(ConfigDelta {
            setting: setting.into(),
            old_value,
            new_value: self.setting_value(setting),
        })
    }

    fn setting_value(&self, setting: &str) -> Value {
        match setting {
            "default_country" => json!(self.default_country),
            "default_language" => json!(self.default_language),
            "max_articles" => json!(self.max_articles),
            "api_timeout" => json!(self.api_timeout),
            "max_concurrent_requests" => json!(self.max_concurrent_requests),
            _ => Value::Null,
        }
    }
}

fn out_of_range(setting: &str) -> NewswireError {
    NewswireError::InvalidSettingValue {
        setting: setting.into(),
        reason: "out of range".into(),
    }
}

fn parse_positive_int(setting: &str, value: &str) -> Result<u64> {
    let n: u64 = value
        .parse()
        .map_err(|_| NewswireError::InvalidSettingValue {
            setting: setting.into(),
            reason: "must be an integer".into(),
        })?;
    if n == 0 {
        return Err(NewswireError::InvalidSettingValue {
            setting: setting.into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(n)
}

/// Shared handle to the configuration context.
///
/// Tools read it per call and `update_config` mutates it; the lock is held
/// only for the copy, never across an await point.
pub type SharedConfig = Arc<RwLock<GatewayConfig>>;

/// Create a shared handle around a configuration
pub fn shared(config: GatewayConfig) -> SharedConfig {
    Arc::new(RwLock::new(config))
}
