//! Unified error type for the ledger, the purchase processor and the bot layer.

use thiserror::Error;

/// Every failure ShelfBuddy can report to an operator or to the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A numeric field did not parse
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidField {
        /// Which record field failed
        field: &'static str,
        /// The offending text
        value: String,
        /// Parser message
        reason: String,
    },

    /// A ledger line did not split into the six expected fields
    #[error("Ledger line {line} has {fields} fields, expected 6")]
    MalformedRow {
        /// 1-based line number in the ledger file
        line: u64,
        /// Number of fields found
        fields: usize,
    },

    /// No record carries the requested barcode
    #[error("Product with barcode {barcode} not found")]
    ProductNotFound {
        /// Barcode that was looked up
        barcode: i64,
    },

    /// The requested quantity exceeds what is on hand
    #[error("Insufficient stock for '{name}': {available} available, {requested} requested")]
    InsufficientStock {
        /// Product name
        name: String,
        /// Quantity on hand
        available: i64,
        /// Quantity asked for
        requested: i64,
    },

    /// Purchase quantity is not a positive integer
    #[error("Invalid quantity: '{input}'")]
    InvalidQuantity {
        /// Operator input
        input: String,
    },

    /// The purchase total does not fit in a decimal amount
    #[error("Total for {quantity} x '{name}' is too large to compute")]
    AmountOverflow {
        /// Product name
        name: String,
        /// Quantity asked for
        quantity: i64,
    },

    /// File system failure while reading or writing the ledger or the log
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ledger file could not be read or written as delimited text
    #[error("Ledger file error: {0}")]
    Csv(#[from] csv::Error),

    /// A required environment variable is missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// True for the validation failures a purchase can end in: unknown barcode,
    /// short stock, a bad quantity or a total too large to compute.
    #[must_use]
    pub const fn is_purchase_rejection(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound { .. }
                | Self::InsufficientStock { .. }
                | Self::InvalidQuantity { .. }
                | Self::AmountOverflow { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
