//! Purchase Discord command - quote a sale, then confirm it.
//!
//! `/purchase` without `confirm` only prices the sale and checks stock. Running it
//! again with `confirm: True` commits it: the receipt is written to the purchase
//! log and the units leave the ledger.

use crate::entities::{
    PurchaseReceipt, Quote,
    purchase::{RECEIPT_TIME_FORMAT, format_money},
};
use chrono::NaiveDateTime;

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{quote_fields, receipt_fields};
    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{self, purchase as processor},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Prices a purchase by barcode, or completes it when `confirm` is set.
    #[poise::command(slash_command)]
    pub async fn purchase(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Barcode of the product"]
        #[autocomplete = "autocomplete::autocomplete_barcode"]
        barcode: String,
        #[description = "Number of units"] quantity: String,
        #[description = "Set to True to complete the purchase"] confirm: Option<bool>,
    ) -> Result<()> {
        let request = processor::parse_barcode(&barcode).and_then(|barcode| {
            processor::parse_quantity(&quantity).map(|quantity| (barcode, quantity))
        });
        let (barcode, quantity) = match request {
            Ok(request) => request,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        if confirm.unwrap_or(false) {
            confirm_purchase(ctx, barcode, quantity).await
        } else {
            quote_purchase(ctx, barcode, quantity).await
        }
    }

    async fn quote_purchase(
        ctx: poise::Context<'_, BotData, Error>,
        barcode: i64,
        quantity: i64,
    ) -> Result<()> {
        let result = {
            let ledger = ctx.data().ledger.lock().await;
            processor::quote(&ledger, barcode, quantity)
        };

        match result {
            Ok(quote) => {
                let embed = serenity::CreateEmbed::default()
                    .title(format!("Quote: {} × {}", quote.quantity, quote.name))
                    .color(0x0058_65F2)
                    .fields(quote_fields(&quote, core::now()))
                    .footer(serenity::CreateEmbedFooter::new(
                        "Run the command again with confirm: True to complete the purchase.",
                    ));
                ctx.send(poise::CreateReply::default().embed(embed)).await?;
                Ok(())
            }
            Err(e) if e.is_purchase_rejection() => {
                ctx.say(format!("❌ {e}")).await?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn confirm_purchase(
        ctx: poise::Context<'_, BotData, Error>,
        barcode: i64,
        quantity: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let result = {
            let mut ledger = data.ledger.lock().await;
            processor::commit(
                &mut ledger,
                &data.purchase_log,
                barcode,
                quantity,
                core::now(),
            )
        };

        match result {
            Ok(receipt) => {
                let embed = serenity::CreateEmbed::default()
                    .title(format!("Purchase recorded: {}", receipt.name))
                    .color(0x0057_F287) // Discord green
                    .fields(receipt_fields(&receipt));
                ctx.send(poise::CreateReply::default().embed(embed)).await?;
                Ok(())
            }
            Err(e) if e.is_purchase_rejection() => {
                ctx.say(format!("❌ {e}. Nothing was sold.")).await?;
                Ok(())
            }
            Err(e) => {
                ctx.say("❌ The purchase could not be recorded. Stock was not changed.")
                    .await?;
                Err(e)
            }
        }
    }
}

// Re-export all commands
pub use inner::*;

/// Embed fields for a quote shown at `quoted_at`.
fn quote_fields(quote: &Quote, quoted_at: NaiveDateTime) -> Vec<(String, String, bool)> {
    vec![
        (
            "Unit price".to_string(),
            format!("${}", format_money(quote.unit_price)),
            true,
        ),
        ("Expiry".to_string(), quote.expiry.clone(), true),
        (
            "Total".to_string(),
            format!(
                "${} × {} = **${}**",
                format_money(quote.unit_price),
                quote.quantity,
                format_money(quote.total)
            ),
            false,
        ),
        (
            "In stock".to_string(),
            quote.available.to_string(),
            true,
        ),
        (
            "Quoted at".to_string(),
            quoted_at.format(RECEIPT_TIME_FORMAT).to_string(),
            true,
        ),
    ]
}

/// Embed fields for a committed purchase.
fn receipt_fields(receipt: &PurchaseReceipt) -> Vec<(String, String, bool)> {
    vec![
        ("Quantity".to_string(), receipt.quantity.to_string(), true),
        (
            "Total".to_string(),
            format!("${}", format_money(receipt.total)),
            true,
        ),
        ("Left in stock".to_string(), receipt.remaining.to_string(), true),
        (
            "Purchased at".to_string(),
            receipt.purchased_at.format(RECEIPT_TIME_FORMAT).to_string(),
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::purchase::quote,
        test_utils::{date, sample_ledger},
    };

    #[test]
    fn test_quote_fields_show_total() {
        let (_dir, mut ledger) = sample_ledger();
        ledger.load();
        let quote = quote(&ledger, 1001, 3).unwrap();
        let at = date(2026, 10, 18).and_hms_opt(9, 5, 0).unwrap();

        let fields = quote_fields(&quote, at);

        assert_eq!(fields[0].1, "$4.50");
        assert_eq!(fields[1].1, "01/01/2099");
        assert_eq!(fields[2].1, "$4.50 × 3 = **$13.50**");
        assert_eq!(fields[3].1, "10");
        assert_eq!(fields[4].1, "18/10/2026 09:05:00");
    }
}
