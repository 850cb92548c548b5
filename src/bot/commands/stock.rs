//! Stock Discord commands - browsing and editing the product ledger.
//!
//! `/stock` groups the table-view actions: list, add, delete, save, refresh and
//! alerts. Positions shown to operators are 1-based.

use crate::{
    core::{alerts::StockAlert, ledger::RefreshReport},
    entities::{ProductRecord, purchase::format_money},
};

/// Discord rejects messages longer than this.
const MESSAGE_LIMIT: usize = 2000;

/// Discord embeds hold at most this many fields.
const EMBED_FIELD_LIMIT: usize = 25;

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{EMBED_FIELD_LIMIT, clip, product_field, render_alerts, render_refresh};
    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{self, purchase::parse_barcode},
        entities::ProductFields,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for browsing and editing the stock ledger.
    #[poise::command(
        slash_command,
        subcommands(
            "stock_list",
            "stock_add",
            "stock_delete",
            "stock_save",
            "stock_refresh",
            "stock_alerts",
            "stock_show"
        )
    )]
    pub async fn stock(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Stock management command. Available subcommands:\n\
            `/stock list` - List all products\n\
            `/stock add` - Add a new product\n\
            `/stock delete` - Delete a product by position\n\
            `/stock save` - Save the ledger to disk\n\
            `/stock refresh` - Reload, check and purge expired products\n\
            `/stock alerts` - Show low-stock and expiry alerts\n\
            `/stock show` - Show one product by barcode";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists every product in ledger order.
    #[poise::command(slash_command, rename = "list")]
    pub async fn stock_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let ledger = ctx.data().ledger.lock().await;

        if ledger.is_empty() {
            drop(ledger);
            ctx.say("The ledger is empty. Use `/stock add` to create products!")
                .await?;
            return Ok(());
        }

        let fields: Vec<(String, String, bool)> = ledger
            .records()
            .iter()
            .enumerate()
            .take(EMBED_FIELD_LIMIT)
            .map(|(index, record)| product_field(index + 1, record))
            .collect();
        let total = ledger.len();
        drop(ledger);

        let mut embed = serenity::CreateEmbed::default()
            .title("**Stock Ledger**")
            .color(0x0058_65F2) // Discord purple
            .fields(fields);
        if total > EMBED_FIELD_LIMIT {
            embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                "Showing {EMBED_FIELD_LIMIT} of {total} products"
            )));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a new product to the ledger (not saved until `/stock save`).
    #[poise::command(slash_command, rename = "add")]
    pub async fn stock_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product name"] name: String,
        #[description = "Unit price (e.g., 4.50)"] price: String,
        #[description = "Barcode (digits only)"] barcode: String,
        #[description = "Quantity on hand"] quantity: String,
        #[description = "Expiry date (dd/mm/yyyy)"] expiry: String,
        #[description = "Restock date (dd/mm/yyyy)"] restock: String,
    ) -> Result<()> {
        let fields = ProductFields {
            name: &name,
            price: &price,
            barcode: &barcode,
            quantity: &quantity,
            expiry: &expiry,
            restock: &restock,
        };

        let added = ctx.data().ledger.lock().await.add_record(fields);
        let message = match added {
            Ok(position) => format!(
                "✅ Product '{}' added at position {position} (barcode {}). Use `/stock save` to keep it.",
                name.trim(),
                barcode.trim()
            ),
            Err(e @ Error::InvalidField { .. }) => format!("❌ {e}. Nothing was added."),
            Err(e) => return Err(e),
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Deletes the product at the given position.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn stock_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Position shown by /stock list"] position: Option<i64>,
    ) -> Result<()> {
        let selection = position
            .and_then(|p| usize::try_from(p).ok())
            .and_then(|p| p.checked_sub(1));

        let removed = ctx.data().ledger.lock().await.delete_record(selection);

        let message = match (removed, position) {
            (Some(record), _) => format!(
                "✅ Product '{}' ({}) has been deleted. Use `/stock save` to keep the change.",
                record.name, record.barcode
            ),
            (None, None) => "No product selected.".to_string(),
            (None, Some(p)) => format!("❌ There is no product at position {p}."),
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Writes the ledger to its file.
    #[poise::command(slash_command, rename = "save")]
    pub async fn stock_save(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let count = {
            let ledger = ctx.data().ledger.lock().await;
            ledger.save()?;
            ledger.len()
        };

        ctx.say(format!("✅ Saved {count} product(s).")).await?;
        Ok(())
    }

    /// Reloads the ledger from its file, shows alerts and purges expired products.
    #[poise::command(slash_command, rename = "refresh")]
    pub async fn stock_refresh(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let report = ctx.data().ledger.lock().await.refresh(core::today());
        ctx.say(clip(&render_refresh(&report))).await?;
        Ok(())
    }

    /// Shows low-stock and near-expiry alerts without changing anything.
    #[poise::command(slash_command, rename = "alerts")]
    pub async fn stock_alerts(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let alerts = {
            let ledger = ctx.data().ledger.lock().await;
            let mut alerts = ledger.check_expiring_soon(core::today());
            alerts.extend(ledger.check_low_stock());
            alerts
        };

        ctx.say(clip(&render_alerts(&alerts))).await?;
        Ok(())
    }

    /// Shows one product by barcode.
    #[poise::command(slash_command, rename = "show")]
    pub async fn stock_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Barcode"]
        #[autocomplete = "autocomplete::autocomplete_barcode"]
        barcode: String,
    ) -> Result<()> {
        let barcode = match parse_barcode(&barcode) {
            Ok(barcode) => barcode,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let found = {
            let ledger = ctx.data().ledger.lock().await;
            ledger
                .records()
                .iter()
                .enumerate()
                .find(|(_, record)| record.barcode == barcode)
                .map(|(index, record)| product_field(index + 1, record))
        };

        match found {
            Some((title, details, _)) => ctx.say(format!("**{title}**\n{details}")).await?,
            None => ctx.say(format!("❌ Product with barcode {barcode} not found.")).await?,
        };
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

/// One embed field describing a product at a 1-based position.
fn product_field(position: usize, record: &ProductRecord) -> (String, String, bool) {
    (
        format!("#{position} {} ({})", record.name, record.barcode),
        format!(
            "${} · Qty {} · Expires {} · Restock {}",
            format_money(record.unit_price),
            record.quantity,
            display_date(record.expiry.as_str()),
            display_date(record.restock.as_str())
        ),
        false,
    )
}

fn display_date(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

fn render_alerts(alerts: &[StockAlert]) -> String {
    if alerts.is_empty() {
        return "✅ No alerts.".to_string();
    }
    alerts.iter().map(|alert| format!("⚠️ {alert}\n")).collect()
}

fn render_refresh(report: &RefreshReport) -> String {
    let mut text = format!("🔄 Reloaded {} product(s)", report.load.loaded);
    if report.load.rejected.is_empty() {
        text.push_str(".\n");
    } else {
        text.push_str(&format!(
            ", skipped {} bad line(s):\n",
            report.load.rejected.len()
        ));
        for row in &report.load.rejected {
            text.push_str(&format!("• line {}: {}\n", row.line, row.error));
        }
    }

    if !report.alerts.is_empty() {
        text.push_str(&render_alerts(&report.alerts));
    }

    if !report.purged.is_empty() {
        text.push_str(&format!(
            "🗑️ Removed {} expired product(s):\n",
            report.purged.len()
        ));
        for record in &report.purged {
            text.push_str(&format!("• {} (expired {})\n", record.name, record.expiry));
        }
    }
    text
}

/// Shortens `text` to fit in one Discord message.
fn clip(text: &str) -> String {
    if text.len() <= MESSAGE_LIMIT {
        return text.to_string();
    }
    let mut end = MESSAGE_LIMIT - '…'.len_utf8();
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}
