//! Bot layer - Discord-specific interface and command handlers
//!
//! This module paints the tracker's list and detail views as Discord messages and
//! maps slash commands onto tracker actions. Every command is owner-only.

/// Discord command implementations (goal, transaction, reminder, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Turns derived views into message text and embeds
pub mod render;

use crate::{core::tracker::SavingsTracker, errors::Error};
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Shared data available to all bot commands.
///
/// The tracker sits behind a single mutex, so commands apply their change and
/// its save one at a time.
pub struct BotData {
    /// The savings tracker all commands operate on
    pub tracker: Mutex<SavingsTracker>,
}

impl BotData {
    /// Creates a new `BotData` around a loaded tracker.
    #[must_use]
    pub fn new(tracker: SavingsTracker) -> Self {
        Self {
            tracker: Mutex::new(tracker),
        }
    }
}

/// Poise context with this bot's data and error types
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::NotAnOwner { ctx, .. } => {
            if let Err(e) = ctx.say("🔒 This savings tracker only answers its owner.").await {
                error!("Failed to send owner notice: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Starts the Discord client and blocks until it shuts down.
pub async fn run_bot(token: String, tracker: SavingsTracker) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::goal(),
                commands::deposit(),
                commands::withdraw(),
                commands::reminder(),
                commands::save_retry(),
                commands::help(),
                commands::ping(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(tracker))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;

    Ok(())
}
