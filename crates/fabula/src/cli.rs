//! CLI command definitions and handlers.

use clap::{Parser, Subcommand};
use fabula_bot::{StepOutcome, StoryBotConfig, StoryStepRunner};
use fabula_models::{GeminiImageClient, OpenAiChatClient};
use fabula_narrative::{StoryGenerator, StoryLimits};
use fabula_social::{DryRunPublisher, Publisher, TelegramPublisher};
use fabula_storage::{FileStateStore, StateRepository};
use tracing::info;

/// Fabula - automated interactive-fiction publisher for Telegram channels
#[derive(Parser, Debug)]
#[command(name = "fabula")]
#[command(about = "Advances a poll-steered serialized story by one published step", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one story step (the cron entry point)
    Step {
        /// Force dry-run mode regardless of environment
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the persisted story state
    State,
}

/// Run one story step against the configured providers and channel.
pub async fn run_step(force_dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let mut config = StoryBotConfig::from_env()?;
    if force_dry_run {
        config.dry_run = true;
    }
    info!(dry_run = config.dry_run, "Configuration validated, running story step");

    let driver = OpenAiChatClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    );
    let generator = StoryGenerator::new(
        driver,
        StoryLimits {
            max_context_chars: config.max_context_chars,
            max_sentences: config.story_max_sentences,
        },
        config.initial_story_idea.clone(),
        config.fallback_choice.clone(),
        config.end_story_option.clone(),
    );

    let renderer = config
        .image
        .as_ref()
        .map(|image| GeminiImageClient::new(image.api_key.clone(), image.model.clone()));
    if renderer.is_none() {
        info!("No image provider configured, steps publish text-only");
    }

    let repository = FileStateStore::new(config.state_path.clone(), config.dry_run);

    let publisher: Box<dyn Publisher> = if config.dry_run {
        Box::new(DryRunPublisher::new())
    } else {
        Box::new(TelegramPublisher::new(
            config.bot_token.clone(),
            config.channel_id.clone(),
        ))
    };

    let runner = StoryStepRunner::new(generator, renderer, publisher, repository, &config);

    match runner.run().await? {
        StepOutcome::AlreadyFinished => {
            info!("Story already concluded, nothing published");
        }
        StepOutcome::Published {
            message_id,
            poll_message_id,
            finished,
        } => {
            info!(
                message_id,
                poll_message_id = ?poll_message_id,
                finished,
                "Story step published"
            );
        }
    }

    Ok(())
}

/// Print the persisted story record as pretty JSON.
pub async fn print_state() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let path = std::env::var("STATE_PATH")
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "state/story_state.json".to_string());

    // Read-only inspection; dry_run guards against accidental writes
    let store = FileStateStore::new(path, true);
    let state = store.load().await?;
    println!("{}", serde_json::to_string_pretty(&state)?);

    Ok(())
}
