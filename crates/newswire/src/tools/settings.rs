//! Configuration Tool
//!
//! `update_config`: mutate one allow-listed setting on the shared
//! configuration context.

use async_trait::async_trait;
use serde_json::json;

use gateway_core::{
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema, tool::ParameterSpec,
};

use crate::config::{SharedConfig, UPDATABLE_SETTINGS};

/// Tool for updating runtime configuration
pub struct UpdateConfigTool {
    config: SharedConfig,
}

impl UpdateConfigTool {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for UpdateConfigTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "update_config".into(),
            description: format!(
                "Update a gateway setting. Allowed settings: {}.",
                UPDATABLE_SETTINGS.join(", ")
            ),
            parameters: vec![
                ParameterSpec::required("setting", "string", "Setting name"),
                ParameterSpec::required("value", "string", "New value"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let setting = call.str_arg("setting").ok_or_else(|| {
            gateway_core::GatewayError::ToolValidation("setting must be a string".into())
        })?;

        // Accept both string and bare numeric JSON values.
        let value = match call.arguments.get("value") {
            Some(v) => v.as_str().map_or_else(|| v.to_string(), str::to_string),
            None => String::new(),
        };

        let delta = self.config.write().unwrap().apply_update(setting, &value)?;

        let output = format!(
            "Updated {}: {} -> {}",
            delta.setting, delta.old_value, delta.new_value
        );
        let data = json!({
            "success": true,
            "setting": delta.setting,
            "old_value": delta.old_value,
            "new_value": delta.new_value,
        });

        Ok(ToolResult::success("update_config", output).with_data(data))
    }
}
