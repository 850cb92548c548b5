//! Product record - One line of the stock ledger.
//!
//! Records are built from six text fields (name, price, barcode, quantity, expiry
//! date, restock date) and validated once, at construction. Numeric fields must
//! parse; date fields keep their raw text and carry the parsed date only when the
//! text matches `dd/mm/yyyy`. The same text is written back on save, so a date the
//! parser could not read survives a load/save cycle unchanged.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Date format used by every date field in the ledger.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Number of fields in one ledger line.
pub const FIELD_COUNT: usize = 6;

/// A date field as stored in the ledger: the original text plus the parsed date,
/// if the text was a valid `dd/mm/yyyy` date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDate {
    text: String,
    date: Option<NaiveDate>,
}

impl LedgerDate {
    /// Wraps raw ledger text, parsing it when possible.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_string();
        let date = NaiveDate::parse_from_str(&text, DATE_FORMAT).ok();
        if date.is_none() {
            tracing::debug!("Unparsable ledger date '{}' kept as text", text);
        }
        Self { text, date }
    }

    /// Builds a field from a real date, formatted the ledger way.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            text: date.format(DATE_FORMAT).to_string(),
            date: Some(date),
        }
    }

    /// The text exactly as it will be written to the ledger file.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed date, `None` if the text was not a valid date.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Borrowed text for the six fields of a record, in ledger order.
///
/// This is what both the ledger file reader and manual entry hand to
/// [`ProductRecord::from_fields`].
#[derive(Clone, Copy, Debug)]
pub struct ProductFields<'a> {
    /// Product name
    pub name: &'a str,
    /// Unit price, decimal text
    pub price: &'a str,
    /// Barcode, integer text
    pub barcode: &'a str,
    /// Quantity on hand, integer text
    pub quantity: &'a str,
    /// Expiry date, `dd/mm/yyyy`
    pub expiry: &'a str,
    /// Restock date, `dd/mm/yyyy`
    pub restock: &'a str,
}

impl<'a> ProductFields<'a> {
    /// Maps a slice of exactly six fields onto named fields.
    /// Returns `None` when the slice has any other length.
    #[must_use]
    pub fn from_slice(fields: &[&'a str]) -> Option<Self> {
        match *fields {
            [name, price, barcode, quantity, expiry, restock] => Some(Self {
                name,
                price,
                barcode,
                quantity,
                expiry,
                restock,
            }),
            _ => None,
        }
    }
}

/// One product in the stock ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name (e.g., "Milk")
    pub name: String,
    /// Price of a single unit
    pub unit_price: Decimal,
    /// Barcode used to look the product up at the till; not guaranteed unique
    pub barcode: i64,
    /// Units on hand
    pub quantity: i64,
    /// Expiry date
    pub expiry: LedgerDate,
    /// Next restock date, stored but not interpreted
    pub restock: LedgerDate,
}

impl ProductRecord {
    /// Builds a record from text fields, parsing the numeric ones.
    ///
    /// # Errors
    /// Returns [`Error::InvalidField`] naming the first field (price, barcode or
    /// quantity) that is not a valid number, or a text field holding a line break.
    pub fn from_fields(fields: ProductFields<'_>) -> Result<Self> {
        Ok(Self {
            name: single_line("name", fields.name)?.trim().to_string(),
            unit_price: parse_number("price", fields.price)?,
            barcode: parse_number("barcode", fields.barcode)?,
            quantity: parse_number("quantity", fields.quantity)?,
            expiry: LedgerDate::parse(single_line("expiry", fields.expiry)?),
            restock: LedgerDate::parse(single_line("restock", fields.restock)?),
        })
    }

    /// The six fields as text, in ledger order.
    #[must_use]
    pub fn to_fields(&self) -> [String; FIELD_COUNT] {
        [
            self.name.clone(),
            self.unit_price.to_string(),
            self.barcode.to_string(),
            self.quantity.to_string(),
            self.expiry.as_str().to_string(),
            self.restock.as_str().to_string(),
        ]
    }

    /// Whole days from `today` until the expiry date, negative once it has passed.
    /// `None` when the expiry text is not a valid date.
    #[must_use]
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry
            .date()
            .map(|expiry| expiry.signed_duration_since(today).num_days())
    }

    /// True when the expiry date is strictly before `today`.
    /// A record with an unparsable expiry date never counts as expired.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry.date().is_some_and(|expiry| expiry < today)
    }
}

// One record per ledger line.
fn single_line<'a>(field: &'static str, text: &'a str) -> Result<&'a str> {
    if text.contains(['\n', '\r']) {
        return Err(Error::InvalidField {
            field,
            value: text.escape_debug().to_string(),
            reason: "line breaks are not allowed".to_string(),
        });
    }
    Ok(text)
}

fn parse_number<T>(field: &'static str, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let trimmed = text.trim();
    trimmed.parse().map_err(|e: T::Err| Error::InvalidField {
        field,
        value: trimmed.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{date, milk_fields};

    #[test]
    fn test_from_fields_parses_numbers() -> Result<()> {
        let record = ProductRecord::from_fields(milk_fields())?;

        assert_eq!(record.name, "Milk");
        assert_eq!(record.unit_price, Decimal::new(450, 2));
        assert_eq!(record.barcode, 1001);
        assert_eq!(record.quantity, 10);
        assert_eq!(record.expiry.date(), Some(date(2099, 1, 1)));
        assert_eq!(record.restock.as_str(), "01/01/2030");
        Ok(())
    }

    #[test]
    fn test_from_fields_rejects_bad_price() {
        let fields = ProductFields {
            price: "four",
            ..milk_fields()
        };

        let result = ProductRecord::from_fields(fields);
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidField { field: "price", .. }
        ));
    }

    #[test]
    fn test_from_fields_rejects_bad_quantity_and_barcode() {
        let bad_quantity = ProductFields {
            quantity: "2.5",
            ..milk_fields()
        };
        assert!(matches!(
            ProductRecord::from_fields(bad_quantity).unwrap_err(),
            Error::InvalidField {
                field: "quantity",
                ..
            }
        ));

        let bad_barcode = ProductFields {
            barcode: "",
            ..milk_fields()
        };
        assert!(matches!(
            ProductRecord::from_fields(bad_barcode).unwrap_err(),
            Error::InvalidField {
                field: "barcode",
                ..
            }
        ));
    }

    #[test]
    fn test_from_fields_rejects_line_breaks() {
        let fields = ProductFields {
            name: "Milk\nBread",
            ..milk_fields()
        };
        assert!(matches!(
            ProductRecord::from_fields(fields),
            Err(Error::InvalidField { field: "name", .. })
        ));

        let fields = ProductFields {
            restock: "01/01/2030\r",
            ..milk_fields()
        };
        assert!(matches!(
            ProductRecord::from_fields(fields),
            Err(Error::InvalidField {
                field: "restock",
                ..
            })
        ));
    }

    #[test]
    fn test_unparsable_dates_are_kept() -> Result<()> {
        let fields = ProductFields {
            expiry: "soon",
            restock: "31/02/2030",
            ..milk_fields()
        };
        let record = ProductRecord::from_fields(fields)?;

        assert_eq!(record.expiry.as_str(), "soon");
        assert!(record.expiry.date().is_none());
        assert!(record.restock.date().is_none());
        assert_eq!(record.days_until_expiry(date(2026, 1, 1)), None);
        assert!(!record.is_expired(date(2026, 1, 1)));
        Ok(())
    }

    #[test]
    fn test_expiry_arithmetic() -> Result<()> {
        let fields = ProductFields {
            expiry: "10/03/2026",
            ..milk_fields()
        };
        let record = ProductRecord::from_fields(fields)?;

        assert_eq!(record.days_until_expiry(date(2026, 3, 5)), Some(5));
        assert_eq!(record.days_until_expiry(date(2026, 3, 12)), Some(-2));
        assert!(!record.is_expired(date(2026, 3, 10)));
        assert!(record.is_expired(date(2026, 3, 11)));
        Ok(())
    }

    #[test]
    fn test_to_fields_keeps_original_text() -> Result<()> {
        let record = ProductRecord::from_fields(milk_fields())?;
        assert_eq!(
            record.to_fields(),
            [
                "Milk".to_string(),
                "4.50".to_string(),
                "1001".to_string(),
                "10".to_string(),
                "01/01/2099".to_string(),
                "01/01/2030".to_string(),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_from_slice_requires_six_fields() {
        assert!(ProductFields::from_slice(&["a", "1", "2", "3", "x", "y"]).is_some());
        assert!(ProductFields::from_slice(&["a", "1", "2"]).is_none());
    }

    #[test]
    fn test_ledger_date_from_date() {
        let field = LedgerDate::from_date(date(2026, 10, 18));
        assert_eq!(field.as_str(), "18/10/2026");
        assert_eq!(field.to_string(), "18/10/2026");
    }
}
