//! Web Search Tool
//!
//! `search_web`, backed by a [`WebSearchSource`].

use std::sync::Arc;

use async_trait::async_trait;

use gateway_core::{
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema, tool::ParameterSpec,
};

use crate::clients::{WebSearchSource, serpapi::MAX_RESULTS};
use crate::config::SharedConfig;

const DEFAULT_NUM_RESULTS: u32 = 10;

/// Tool for running a web search
pub struct SearchWebTool {
    source: Arc<dyn WebSearchSource>,
    config: SharedConfig,
}

impl SearchWebTool {
    pub fn new(source: Arc<dyn WebSearchSource>, config: SharedConfig) -> Self {
        Self { source, config }
    }
}

#[async_trait]
impl Tool for SearchWebTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_web".into(),
            description: "Search the web for a query and return organic results.".into(),
            parameters: vec![
                ParameterSpec::required("query", "string", "Search query"),
                ParameterSpec::optional("num_results", "number", "Number of results (max 100)"),
                ParameterSpec::optional("location", "string", "Location bias (e.g., 'London, UK')"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let query = call.str_arg("query").ok_or_else(|| {
            gateway_core::GatewayError::ToolValidation("query must be a string".into())
        })?;

        let timeout = self.config.read().unwrap().timeout();

        let num_results = call
            .int_arg("num_results")
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_NUM_RESULTS)
            .clamp(1, MAX_RESULTS);
        let location = call.str_arg("location");

        let payload = self
            .source
            .search(query, num_results, location, timeout)
            .await?;

        let count = payload["organic_results"].as_array().map_or(0, Vec::len);
        let output = format!("Found {count} web results for '{query}'");
        Ok(ToolResult::success("search_web", output).with_data(payload))
    }
}
