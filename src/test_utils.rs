//! Shared test utilities for `ShelfBuddy`.
//!
//! This module provides scratch directories for ledger and log files, a sample
//! ledger, and small constructors with sensible defaults.

use crate::{
    core::{alerts::InventoryRules, ledger::Ledger},
    entities::ProductFields,
};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Four products: two long-lived, one expiring on 20/10/2026, one long expired.
/// Bread is the only one under the default low-stock threshold.
pub const SAMPLE_LEDGER: &str = "Milk,4.50,1001,10,01/01/2099,01/01/2030\n\
Bread,2.00,1002,3,01/01/2099,01/01/2030\n\
Eggs,3.20,1003,12,20/10/2026,01/11/2026\n\
Old Cheese,7.25,1004,8,01/01/2020,01/01/2020\n";

/// A fresh, empty directory under the system temp dir, removed on drop.
///
/// # Panics
/// Panics if the directory cannot be created.
#[allow(clippy::expect_used)]
#[must_use]
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("create scratch dir")
}

/// The Milk record used throughout the tests: 4.50, barcode 1001, 10 on hand.
#[must_use]
pub const fn milk_fields() -> ProductFields<'static> {
    ProductFields {
        name: "Milk",
        price: "4.50",
        barcode: "1001",
        quantity: "10",
        expiry: "01/01/2099",
        restock: "01/01/2030",
    }
}

/// Builds a date, panicking on an invalid one.
///
/// # Panics
/// Panics if the date does not exist.
#[allow(clippy::expect_used)]
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Writes [`SAMPLE_LEDGER`] to a scratch directory and returns an unloaded ledger
/// pointing at it. Keep the directory alive for as long as the ledger is used.
///
/// # Panics
/// Panics if the sample file cannot be written.
#[allow(clippy::expect_used)]
#[must_use]
pub fn sample_ledger() -> (TempDir, Ledger) {
    let dir = scratch_dir();
    let path = dir.path().join("banco.txt");
    std::fs::write(&path, SAMPLE_LEDGER).expect("write sample ledger");
    let ledger = Ledger::new(path, InventoryRules::default());
    (dir, ledger)
}
