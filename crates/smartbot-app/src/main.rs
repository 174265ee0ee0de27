//! SmartBot application binary - composition root.
//!
//! 1. Parse CLI arguments and initialize tracing
//! 2. Load configuration from TOML, falling back to defaults
//! 3. Run the requested command: the API server, a one-shot answer, or an
//!    interactive chat on stdin

mod cli;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};
use uuid::Uuid;

use smartbot_api::AppState;
use smartbot_chat::{send_or_apologize, ChatService, ResponseResolver, ResponseTable, TableError};
use smartbot_core::config::{ChatConfig, SmartBotConfig};
use smartbot_core::types::ChatMessageCreate;

use cli::{CliArgs, Command};

/// Words that end an interactive chat.
const EXIT_WORDS: &[&str] = &["quit", "exit"];

/// Level used until the config file has been read.
const STARTUP_LOG_LEVEL: &str = "info";

/// Install the global subscriber.
///
/// `RUST_LOG` wins outright. Otherwise `level` applies and the returned
/// handle can swap the filter once the config file is known.
fn init_tracing(level: &str) -> Option<reload::Handle<EnvFilter, Registry>> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(level), false),
    };
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    (!from_env).then_some(handle)
}

/// Resolver over the configured table, or the built-in one.
fn build_resolver(chat: &ChatConfig) -> Result<ResponseResolver, TableError> {
    match chat.responses_path.as_deref() {
        Some(path) => Ok(ResponseResolver::new(ResponseTable::load(Path::new(path))?)),
        None => Ok(ResponseResolver::builtin()),
    }
}

/// Session ids in the same shape the web demo generates.
fn new_session_id() -> String {
    format!(
        "session_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

async fn run_serve(
    mut config: SmartBotConfig,
    port: Option<u16>,
    host: Option<String>,
    fixtures: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    config.server.port = cli::resolve_port(port, config.server.port);
    config.server.host = cli::resolve_host(host, &config.server.host);
    config.chat.seed_fixtures |= fixtures;
    config.validate()?;

    let state = AppState::new(config.clone())?;
    smartbot_api::start_server(&config, state).await?;
    Ok(())
}

fn run_ask(config: &SmartBotConfig, text: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = build_resolver(&config.chat)?;
    println!("{}", resolver.resolve(&text.join(" ")));
    Ok(())
}

async fn run_chat(config: SmartBotConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = ChatService::new(build_resolver(&config.chat)?, config.chat.clone());
    let session_id = new_session_id();
    tracing::debug!(session_id = %session_id, "Interactive chat started");

    println!("SmartBot: {}", service.welcome_message(&session_id).content);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&content.to_lowercase().as_str()) {
            break;
        }

        let reply = send_or_apologize(
            &service,
            ChatMessageCreate {
                session_id: session_id.clone(),
                content: content.to_string(),
            },
        )
        .await;
        println!("SmartBot: {}", reply.content);
    }

    tracing::debug!(session_id = %session_id, "Interactive chat ended");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let filter = init_tracing(&args.resolve_log_level(STARTUP_LOG_LEVEL));
    tracing::debug!("Starting SmartBot v{}", env!("CARGO_PKG_VERSION"));

    let config_file = args.resolve_config_path();
    let mut config = SmartBotConfig::load_or_default(&config_file);
    config.general.log_level = args.resolve_log_level(&config.general.log_level);

    // Without --log-level or RUST_LOG the config file picks the level.
    if let (Some(handle), None) = (filter, args.log_level.as_ref()) {
        if let Err(e) = handle.reload(EnvFilter::new(&config.general.log_level)) {
            tracing::warn!(error = %e, "Failed to apply configured log level");
        }
    }

    match args.command {
        Command::Serve {
            port,
            host,
            fixtures,
        } => run_serve(config, port, host, fixtures).await,
        Command::Ask { text } => run_ask(&config, &text),
        Command::Chat => run_chat(config).await,
    }
}
