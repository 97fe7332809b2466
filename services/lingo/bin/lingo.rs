//! Main Entrypoint for the Lingo CLI
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging on stderr.
//! 3. Resolving the remote assistant and thread.
//! 4. Running the study round: collecting the notes and the word, then
//!    requesting and printing a study suggestion and related vocabulary.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use clap::Parser;
use lingo_core::{
    backend::{AssistantBackend, AssistantId, ThreadId},
    openai::OpenAIAssistantBackend,
    session::{AssistantSession, Resolution, SessionConfig},
};
use lingo_service::{app, cli::Cli, config::Config};
use std::{
    io::{self, Write},
    sync::Arc,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(io::stderr)
        .init();
    info!(
        model = %config.model,
        api_base = %config.api_base,
        history_mode = ?config.history_mode,
        "Configuration loaded"
    );

    // --- 3. Resolve Assistant and Thread ---
    let openai_config = OpenAIConfig::new()
        .with_api_key(&config.openai_api_key)
        .with_api_base(&config.api_base);
    let backend: Arc<dyn AssistantBackend> =
        Arc::new(OpenAIAssistantBackend::new(openai_config));

    let mut session = AssistantSession::open(
        backend,
        SessionConfig {
            assistant_id: config.assistant_id.clone().map(AssistantId::from),
            thread_id: config.thread_id.clone().map(ThreadId::from),
            model: config.model.clone(),
            poll_interval: config.poll_interval,
            history_mode: config.history_mode,
        },
    )
    .await
    .context("Failed to set up assistant session")?;

    let mut stdout = io::stdout();
    let assistant_line = match session.assistant_resolution() {
        Resolution::Created => "New assistant created with ID",
        Resolution::Reused => "Using existing assistant with ID",
    };
    writeln!(stdout, "{assistant_line}: {}", session.assistant_id())?;
    let thread_line = match session.thread_resolution() {
        Resolution::Created => "New thread created with ID",
        Resolution::Reused => "Using existing thread with ID",
    };
    writeln!(stdout, "{thread_line}: {}", session.thread_id())?;

    // --- 4. Collect Input, Ask and Print ---
    let mut stdin = io::stdin().lock();
    app::run_study(&mut session, cli.notes, cli.word, &mut stdin, &mut stdout).await?;

    info!("Done.");
    Ok(())
}
