//! Entity module - the typed values the ledger and the purchase processor work on.
//! Records are parsed once from ledger text; purchases produce quotes and receipts.

pub mod product;
pub mod purchase;

pub use product::{LedgerDate, ProductFields, ProductRecord};
pub use purchase::{PurchaseReceipt, Quote};
