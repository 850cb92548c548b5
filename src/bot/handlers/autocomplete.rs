//! Autocomplete handlers for Discord slash command parameters.

use crate::{
    bot::BotData,
    entities::ProductRecord,
    errors::Error,
};

/// Provides autocomplete suggestions for barcodes.
///
/// Matches the partial input against barcodes (prefix) and product names
/// (case-insensitive substring) and returns up to 25 barcodes, the Discord limit.
pub async fn autocomplete_barcode(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let ledger = ctx.data().ledger.lock().await;
    matching_barcodes(ledger.records(), partial)
}

fn matching_barcodes(records: &[ProductRecord], partial: &str) -> Vec<String> {
    let partial = partial.trim();
    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<String> = records
        .iter()
        .filter(|record| {
            record.barcode.to_string().starts_with(partial)
                || record.name.to_lowercase().contains(&partial_lower)
        })
        .map(|record| record.barcode.to_string())
        .collect();

    // Duplicate barcodes resolve to the first record anyway
    matching.sort();
    matching.dedup();
    matching.truncate(25);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_ledger;

    #[test]
    fn test_matches_barcode_prefix_and_name() {
        let (_dir, mut ledger) = sample_ledger();
        ledger.load();

        assert_eq!(
            matching_barcodes(ledger.records(), "100"),
            vec!["1001", "1002", "1003", "1004"]
        );
        assert_eq!(matching_barcodes(ledger.records(), "cheese"), vec!["1004"]);
        assert!(matching_barcodes(ledger.records(), "999").is_empty());
    }
}
