//! Agent Loop
//!
//! Drives one conversation turn end to end: send the conversation to the
//! provider, parse the raw reply into an [`Action`], dispatch it, and feed
//! tool outcomes back as context until the model produces a plain reply.

use std::sync::Arc;

use crate::action::{Action, ActionParser};
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::{GatewayError, Result};
use crate::message::{Conversation, Message, Role};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::ToolRegistry;

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt template
    pub system_prompt: String,

    /// Maximum reasoning iterations before giving up
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Whether to append the tool catalog to the system prompt
    pub inject_tool_descriptions: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            generation: GenerationOptions::default(),
            inject_tool_descriptions: true,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful assistant.

When you need to use a tool, reply with a single JSON object in this exact format:
{"action": "use_tool", "tool": "tool_name", "arguments": {"arg1": "value1"}}

After receiving tool results, synthesize them into a helpful response.
If you can answer directly without tools, do so.
Be concise and accurate."#;

/// The conversational agent: provider + parser + dispatcher
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    dispatcher: Dispatcher,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            dispatcher: Dispatcher::new(tools),
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>) -> Self {
        Self::new(provider, tools, AgentConfig::default())
    }

    /// Build the full system prompt including the tool catalog
    fn build_system_prompt(&self) -> String {
        let mut prompt = self.config.system_prompt.clone();

        if self.config.inject_tool_descriptions && !self.dispatcher.registry().is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&self.dispatcher.registry().prompt_section());
        }

        prompt
    }

    /// Run the agent until the model produces a plain text reply
    pub async fn run(&self, conversation: &mut Conversation) -> Result<String> {
        // Ensure system prompt is set
        if conversation.messages().first().map(|m| &m.role) != Some(&Role::System) {
            let messages = conversation.messages_mut();
            messages.insert(0, Message::system(self.build_system_prompt()));
        }

        let mut iterations = 0;

        loop {
            iterations += 1;

            if iterations > self.config.max_iterations {
                return Err(GatewayError::MaxIterations(self.config.max_iterations));
            }

            let completion = self
                .provider
                .complete(conversation.messages(), &self.config.generation)
                .await?;

            let action = ActionParser::parse(&completion.content);

            match self.dispatcher.execute(action, conversation).await {
                DispatchOutcome::Text(content) => return Ok(content),
                DispatchOutcome::Tool(result) => {
                    tracing::debug!(tool = %result.name, "tool executed");
                    conversation.push(Message::tool(format!(
                        "[Tool '{}' returned]\n{}",
                        result.name, result.output
                    )));
                }
                DispatchOutcome::Error(report) => {
                    // Structured failures flow back as context so the model
                    // can recover; they never abort the session.
                    tracing::debug!(kind = ?report.kind, "dispatch error fed back to model");
                    conversation.push(Message::tool(format!(
                        "[Tool call failed]\n{}",
                        report.to_json()
                    )));
                }
            }
        }
    }

    /// Run with a simple string input (creates a temporary conversation)
    pub async fn ask(&self, question: &str) -> Result<String> {
        let mut conversation = Conversation::with_system_prompt(self.build_system_prompt());
        conversation.push(Message::user(question));
        self.run(&mut conversation).await
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        self.dispatcher.registry()
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Builder for agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: crate::tool::Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| GatewayError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}
