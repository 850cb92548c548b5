//! Purchase processing - barcode lookup, quoting and committing sales.
//!
//! A purchase goes through two steps. [`quote`] resolves the barcode, checks the
//! requested quantity against stock and prices it without touching the ledger.
//! [`commit`] repeats the same checks, writes the receipt to the purchase log and,
//! only once that write has succeeded, takes the units out of stock. A failed log
//! write therefore never leaves a decrement without a receipt.

use crate::{
    core::{ledger::Ledger, purchase_log::PurchaseLog},
    entities::{ProductRecord, PurchaseReceipt, Quote},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// First record carrying `barcode`, scanning in ledger order.
#[must_use]
pub fn find_by_barcode(ledger: &Ledger, barcode: i64) -> Option<&ProductRecord> {
    ledger.records().iter().find(|record| record.barcode == barcode)
}

/// Parses a barcode typed by the operator.
///
/// # Errors
/// Returns [`Error::InvalidField`] if the text is not an integer.
pub fn parse_barcode(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed.parse().map_err(|e: std::num::ParseIntError| Error::InvalidField {
        field: "barcode",
        value: trimmed.to_string(),
        reason: e.to_string(),
    })
}

/// Parses a purchase quantity typed by the operator.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] unless the text is a positive integer.
pub fn parse_quantity(input: &str) -> Result<i64> {
    match input.trim().parse::<i64>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(Error::InvalidQuantity {
            input: input.trim().to_string(),
        }),
    }
}

/// Prices a purchase without changing anything.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for a quantity below 1,
/// [`Error::ProductNotFound`] for an unknown barcode,
/// [`Error::InsufficientStock`] when fewer units are on hand than requested and
/// [`Error::AmountOverflow`] when the total cannot be represented.
pub fn quote(ledger: &Ledger, barcode: i64, quantity: i64) -> Result<Quote> {
    let (_, record) = validate(ledger, barcode, quantity)?;
    Ok(Quote {
        barcode,
        name: record.name.clone(),
        unit_price: record.unit_price,
        quantity,
        total: total_price(record, quantity)?,
        expiry: record.expiry.as_str().to_string(),
        available: record.quantity,
    })
}

/// Applies a confirmed purchase.
///
/// The record is resolved and validated again, the receipt is appended to `log`,
/// and the quantity is decremented after the append succeeds.
///
/// # Errors
/// Returns the same validation errors as [`quote`], or an I/O error from the log
/// append. In every error case the ledger is left as it was.
pub fn commit(
    ledger: &mut Ledger,
    log: &PurchaseLog,
    barcode: i64,
    quantity: i64,
    purchased_at: NaiveDateTime,
) -> Result<PurchaseReceipt> {
    let (index, record) = validate(ledger, barcode, quantity)?;
    let receipt = PurchaseReceipt {
        name: record.name.clone(),
        barcode,
        quantity,
        total: total_price(record, quantity)?,
        purchased_at,
        remaining: record.quantity - quantity,
    };

    log.append(&receipt).inspect_err(|e| {
        tracing::error!(
            "Could not record purchase of {} x '{}': {}",
            quantity,
            receipt.name,
            e
        );
    })?;

    // `ledger` has been exclusively borrowed since `validate`, so `index` still holds.
    ledger.records_mut()[index].quantity = receipt.remaining;

    tracing::info!(
        "Sold {} x '{}' for {} ({} left)",
        quantity,
        receipt.name,
        receipt.total,
        receipt.remaining
    );
    Ok(receipt)
}

/// Resolves and checks a purchase, returning the record and its position.
fn validate(ledger: &Ledger, barcode: i64, quantity: i64) -> Result<(usize, &ProductRecord)> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity {
            input: quantity.to_string(),
        });
    }

    let (index, record) = ledger
        .records()
        .iter()
        .enumerate()
        .find(|(_, record)| record.barcode == barcode)
        .ok_or(Error::ProductNotFound { barcode })?;

    if record.quantity < quantity {
        return Err(Error::InsufficientStock {
            name: record.name.clone(),
            available: record.quantity,
            requested: quantity,
        });
    }

    Ok((index, record))
}

fn total_price(record: &ProductRecord, quantity: i64) -> Result<Decimal> {
    record
        .unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| Error::AmountOverflow {
            name: record.name.clone(),
            quantity,
        })
}
