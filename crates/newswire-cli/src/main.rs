//! newswire terminal chat
//!
//! Wires the Ollama provider, the tool catalog, and one session into a
//! stdin/stdout chat loop. The HTTP front end is a separate collaborator;
//! this binary is the reference presenter.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_core::{Agent, AgentConfig, LlmProvider, Session, ToolRegistry};
use gateway_runtime::OllamaProvider;
use newswire::{
    EventBook, FeedAggregator, GatewayConfig, NEWSWIRE_PROMPT,
    clients::{NewsApiClient, SerpApiClient},
    config,
    fetch::HttpTransport,
    tools::{
        AddEventTool, DeleteEventTool, GetEventsTool, ParseRssFeedTool, SearchNewsTool,
        SearchWebTool, TopHeadlinesTool, UpdateConfigTool,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    for key in ["NEWSAPI_KEY", "SERPAPI_KEY"] {
        if std::env::var(key).is_err() {
            tracing::warn!("{key} not set - the matching tool will report a config error");
        }
    }

    // Initialize LLM provider
    let provider = Arc::new(OllamaProvider::from_env());

    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("connected to Ollama");
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::info!("  model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("Ollama not available - chat turns will fail");
            tracing::warn!("  make sure Ollama is running: ollama serve");
        }
    }

    // Shared context: configuration and the event book
    let shared_config = config::shared(GatewayConfig::default());
    let event_book = Arc::new(EventBook::new());

    // Remote source clients
    let news = Arc::new(NewsApiClient::from_env());
    let web = Arc::new(SerpApiClient::from_env());
    let aggregator = FeedAggregator::new(Arc::new(HttpTransport::new()));

    // Register the tool catalog
    let mut tools = ToolRegistry::new();
    tools.register(SearchNewsTool::new(news.clone(), shared_config.clone()));
    tools.register(TopHeadlinesTool::new(news, shared_config.clone()));
    tools.register(SearchWebTool::new(web, shared_config.clone()));
    tools.register(ParseRssFeedTool::new(aggregator.clone(), shared_config.clone()));
    tools.register(AddEventTool::new(event_book.clone()));
    tools.register(GetEventsTool::new(event_book.clone()));
    tools.register(DeleteEventTool::new(event_book));
    tools.register(UpdateConfigTool::new(shared_config.clone()));

    tracing::info!("registered {} tools", tools.len());

    let agent = Agent::new(
        provider,
        Arc::new(tools),
        AgentConfig {
            system_prompt: NEWSWIRE_PROMPT.into(),
            ..Default::default()
        },
    );

    chat_loop(&agent, &aggregator, &shared_config).await
}

/// One session, one conversation, until EOF or "exit".
///
/// The built-in `feeds` command aggregates the configured default feeds
/// directly, without a model round trip.
async fn chat_loop(
    agent: &Agent,
    aggregator: &FeedAggregator,
    config: &newswire::SharedConfig,
) -> Result<()> {
    let mut session = Session::new();
    tracing::info!(session = %session.id, "session started");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }
        if input == "feeds" {
            let snapshot = config.read().unwrap().clone();
            let digest = aggregator.fetch_default_feeds(&snapshot, 5).await;
            let rendered = serde_json::to_string_pretty(&digest)?;
            stdout.write_all(format!("{rendered}\n").as_bytes()).await?;
            continue;
        }

        session
            .conversation
            .push(gateway_core::Message::user(input));
        session.touch();

        // Errors render inline; the session stays usable for the next turn.
        match agent.run(&mut session.conversation).await {
            Ok(reply) => {
                stdout.write_all(format!("assistant> {reply}\n").as_bytes()).await?;
            }
            Err(e) => {
                tracing::error!("turn failed: {e}");
                stdout
                    .write_all(format!("assistant> {}\n", e.user_message()).as_bytes())
                    .await?;
            }
        }
    }

    session.end();
    tracing::info!(session = %session.id, messages = session.message_count(), "session ended");
    Ok(())
}
