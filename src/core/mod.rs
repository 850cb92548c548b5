//! Core business logic - framework-agnostic ledger and purchase operations.

/// Low-stock and expiry alerts
pub mod alerts;
/// The stock ledger and its lifecycle
pub mod ledger;
/// Barcode lookup, quoting and committing purchases
pub mod purchase;
/// Append-only purchase log
pub mod purchase_log;
/// Ledger file reading and writing
pub mod storage;

/// Today's date on the local clock, used by the expiry checks.
#[must_use]
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// The current local time, stamped on receipts.
#[must_use]
pub fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
