use dotenvy::dotenv;
use shelf_buddy::{
    bot::{self, BotData},
    config,
    core,
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Load the ledger and run the startup checks
    let data = BotData::from_config(&app_config);
    {
        let mut ledger = data.ledger.lock().await;
        let report = ledger.refresh(core::today());
        info!(
            "Ledger ready: {} product(s), {} alert(s), {} expired product(s) purged.",
            ledger.len(),
            report.alerts.len(),
            report.purged.len()
        );
        if !report.load.rejected.is_empty() {
            warn!(
                "{} ledger line(s) were skipped; they will be dropped on the next save.",
                report.load.rejected.len()
            );
        }
    }

    // 5. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, data).await
}
