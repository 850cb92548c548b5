//! Stock alerts - low stock and near-expiry warnings.
//!
//! Alerts are plain values; the ledger logs them and the bot layer renders them.

use crate::entities::ProductRecord;
use chrono::NaiveDate;
use std::fmt;

/// Thresholds that decide when a record deserves an alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InventoryRules {
    /// Quantities strictly below this are low stock
    pub low_stock_threshold: i64,
    /// Records expiring within this many days (inclusive) are flagged
    pub expiry_warning_days: i64,
}

impl Default for InventoryRules {
    fn default() -> Self {
        Self {
            low_stock_threshold: 5,
            expiry_warning_days: 5,
        }
    }
}

/// A warning about one product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StockAlert {
    /// The product expires within the warning window, or already has
    ExpiringSoon {
        /// Product name
        name: String,
        /// Product barcode
        barcode: i64,
        /// Days until expiry, negative once expired
        days_left: i64,
    },
    /// The product is running out
    LowStock {
        /// Product name
        name: String,
        /// Product barcode
        barcode: i64,
        /// Units on hand
        quantity: i64,
    },
}

impl fmt::Display for StockAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpiringSoon {
                name, days_left, ..
            } if *days_left < 0 => write!(
                f,
                "Attention! Product '{name}' expired {} day(s) ago.",
                -days_left
            ),
            Self::ExpiringSoon { name, .. } => {
                write!(f, "Attention! Product '{name}' is close to its expiry date.")
            }
            Self::LowStock { name, quantity, .. } => write!(
                f,
                "Attention! Product '{name}' is low on stock ({quantity} left)."
            ),
        }
    }
}

/// Checks one record against the expiry window.
#[must_use]
pub fn expiring_soon(
    record: &ProductRecord,
    today: NaiveDate,
    rules: InventoryRules,
) -> Option<StockAlert> {
    let days_left = record.days_until_expiry(today)?;
    (days_left <= rules.expiry_warning_days).then(|| StockAlert::ExpiringSoon {
        name: record.name.clone(),
        barcode: record.barcode,
        days_left,
    })
}

/// Checks one record against the low-stock threshold.
#[must_use]
pub fn low_stock(record: &ProductRecord, rules: InventoryRules) -> Option<StockAlert> {
    (record.quantity < rules.low_stock_threshold).then(|| StockAlert::LowStock {
        name: record.name.clone(),
        barcode: record.barcode,
        quantity: record.quantity,
    })
}
