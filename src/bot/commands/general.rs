//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**ShelfBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Stock**\n\
        • `/stock list` - Shows every product with its position in the ledger.\n\
        • `/stock add <name> <price> <barcode> <quantity> <expiry> <restock>` - Adds a product (dates as dd/mm/yyyy).\n\
        • `/stock delete [position]` - Deletes the product at that position.\n\
        • `/stock save` - Writes the ledger to disk. Unsaved edits are lost on restart or refresh.\n\
        • `/stock refresh` - Reloads from disk, shows alerts and purges expired products.\n\
        • `/stock alerts` - Shows low-stock and near-expiry alerts.\n\
        • `/stock show <barcode>` - Shows one product.\n\n\
        **Sales**\n\
        • `/purchase <barcode> <quantity>` - Prices a purchase.\n\
        • `/purchase <barcode> <quantity> confirm:True` - Completes it and records a receipt.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
