//! Purchase values - the quote shown before confirmation and the receipt written after.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format used on receipts.
pub const RECEIPT_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Line written between two receipt blocks in the purchase log.
pub const RECEIPT_DIVIDER: &str = "-----";

/// A priced, stock-checked purchase that has not been applied yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Barcode the product was resolved from
    pub barcode: i64,
    /// Product name
    pub name: String,
    /// Price of a single unit
    pub unit_price: Decimal,
    /// Units requested
    pub quantity: i64,
    /// `unit_price * quantity`
    pub total: Decimal,
    /// Expiry date text of the product
    pub expiry: String,
    /// Units on hand when the quote was made
    pub available: i64,
}

/// A committed purchase, as recorded in the purchase log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Product name
    pub name: String,
    /// Barcode the product was resolved from
    pub barcode: i64,
    /// Units sold
    pub quantity: i64,
    /// Amount charged
    pub total: Decimal,
    /// When the purchase was committed (local time)
    pub purchased_at: NaiveDateTime,
    /// Units left on hand after the sale
    pub remaining: i64,
}

/// Renders the block appended to the purchase log, divider included.
impl fmt::Display for PurchaseReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Product purchased: {}", self.name)?;
        writeln!(f, "Quantity purchased: {}", self.quantity)?;
        writeln!(f, "Total price: {}", format_money(self.total))?;
        writeln!(
            f,
            "Purchased at: {}",
            self.purchased_at.format(RECEIPT_TIME_FORMAT)
        )?;
        writeln!(f)?;
        writeln!(f, "{RECEIPT_DIVIDER}")
    }
}

/// Formats an amount with exactly two decimal places.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_receipt_block_layout() {
        let receipt = PurchaseReceipt {
            name: "Milk".to_string(),
            barcode: 1001,
            quantity: 3,
            total: Decimal::new(1350, 2),
            purchased_at: date(2026, 10, 18).and_hms_opt(14, 3, 11).unwrap_or_default(),
            remaining: 7,
        };

        assert_eq!(
            receipt.to_string(),
            "Product purchased: Milk\n\
             Quantity purchased: 3\n\
             Total price: 13.50\n\
             Purchased at: 18/10/2026 14:03:11\n\
             \n\
             -----\n"
        );
    }

    #[test]
    fn test_format_money_pads_and_rounds() {
        assert_eq!(format_money(Decimal::new(135, 1)), "13.50");
        assert_eq!(format_money(Decimal::new(7, 0)), "7.00");
        assert_eq!(format_money(Decimal::new(19_999, 3)), "20.00");
    }
}
