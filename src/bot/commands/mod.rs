//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Purchase command (quote and confirm)
pub mod purchase;

/// Stock ledger management commands
pub mod stock;

// Export commands
pub use general::*;
pub use purchase::*;
pub use stock::*;
