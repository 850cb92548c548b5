//! Bot layer - Discord-specific interface and command handlers
//!
//! This module is the operator interface for ShelfBuddy: slash commands to browse
//! and edit the stock ledger and to price and confirm purchases. It holds no
//! business logic of its own; every command calls into [`crate::core`].

/// Discord command implementations (stock, purchase, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::AppConfig,
    core::{ledger::Ledger, purchase_log::PurchaseLog},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// The ledger sits behind a mutex so exactly one command reads or mutates it at a
/// time; a purchase commit holds the lock across the log append and the decrement.
pub struct BotData {
    /// The stock ledger
    pub ledger: Mutex<Ledger>,
    /// Where committed purchases are recorded
    pub purchase_log: PurchaseLog,
}

impl BotData {
    /// Creates a new `BotData` from an already loaded ledger.
    #[must_use]
    pub fn new(ledger: Ledger, purchase_log: PurchaseLog) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            purchase_log,
        }
    }

    /// Builds the shared state described by `config`, without loading anything.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Ledger::new(config.ledger_path.clone(), config.rules()),
            PurchaseLog::new(config.purchase_log_path.clone()),
        )
    }
}

/// Poise context with ShelfBuddy's data and error types.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Every slash command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::stock(),
        commands::purchase(),
    ]
}

/// Connects to Discord and serves commands until the client stops.
///
/// # Errors
/// Returns an error if the client cannot be built or the connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
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

pub use commands::*;
pub use handlers::*;
