//! Inventory ledger - the in-memory product list and its backing file.
//!
//! The ledger owns every product record. It is loaded from and saved to the ledger
//! file explicitly; nothing is written to disk until [`Ledger::save`] is called, so
//! unsaved edits are lost if the process stops. Expiry and stock checks produce
//! [`StockAlert`] values, and expired products can be purged in one pass.

use crate::{
    core::{
        alerts::{self, InventoryRules, StockAlert},
        storage::{self, RejectedRow},
    },
    entities::{ProductFields, ProductRecord},
    errors::Result,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Outcome of a [`Ledger::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of records appended to the ledger
    pub loaded: usize,
    /// Lines that were skipped, with the reason
    pub rejected: Vec<RejectedRow>,
}

/// Outcome of a [`Ledger::refresh`].
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// What the reload found
    pub load: LoadReport,
    /// Expiry alerts followed by low-stock alerts, computed before the purge
    pub alerts: Vec<StockAlert>,
    /// Records removed because they had expired, in ledger order
    pub purged: Vec<ProductRecord>,
}

/// The stock ledger.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    rules: InventoryRules,
    records: Vec<ProductRecord>,
}

impl Ledger {
    /// Creates an empty ledger backed by the file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>, rules: InventoryRules) -> Self {
        Self {
            path: path.into(),
            rules,
            records: Vec::new(),
        }
    }

    /// Path of the backing ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Thresholds used by the stock checks.
    #[must_use]
    pub const fn rules(&self) -> InventoryRules {
        self.rules
    }

    /// All records, in ledger order.
    #[must_use]
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ProductRecord> {
        self.records.get(index)
    }

    pub(crate) fn records_mut(&mut self) -> &mut [ProductRecord] {
        &mut self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the ledger holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Reads the ledger file and appends one record per well-formed line, in file
    /// order. A missing file leaves the ledger as it was.
    pub fn load(&mut self) -> LoadReport {
        let rows = storage::read_ledger_file(&self.path);
        let loaded = rows.records.len();
        self.records.extend(rows.records);

        tracing::info!(
            "Loaded {} record(s) from {:?} ({} rejected)",
            loaded,
            self.path,
            rows.rejected.len()
        );
        LoadReport {
            loaded,
            rejected: rows.rejected,
        }
    }

    /// Overwrites the ledger file with the current records.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written. The in-memory records are
    /// left untouched either way.
    pub fn save(&self) -> Result<()> {
        storage::write_ledger_file(&self.path, &self.records)
            .inspect(|_| {
                tracing::info!("Saved {} record(s) to {:?}", self.records.len(), self.path);
            })
            .inspect_err(|e| tracing::error!("Failed to save ledger to {:?}: {}", self.path, e))
    }

    /// Parses operator-supplied fields and appends the new record, returning its
    /// 1-based position.
    ///
    /// # Errors
    /// Returns an error naming the first numeric field that does not parse; the
    /// ledger is unchanged in that case.
    pub fn add_record(&mut self, fields: ProductFields<'_>) -> Result<usize> {
        let record = ProductRecord::from_fields(fields)?;
        tracing::info!("Added product '{}' ({})", record.name, record.barcode);
        self.records.push(record);
        Ok(self.records.len())
    }

    /// Removes the selected record. Without a selection, or with a position past
    /// the end, nothing happens.
    pub fn delete_record(&mut self, selection: Option<usize>) -> Option<ProductRecord> {
        let index = selection.filter(|&index| index < self.records.len())?;
        let removed = self.records.remove(index);
        tracing::info!("Deleted product '{}' ({})", removed.name, removed.barcode);
        Some(removed)
    }

    /// Flags every record whose expiry date falls within the warning window of
    /// `today`, including already-expired ones. Unparsable dates are skipped.
    #[must_use]
    pub fn check_expiring_soon(&self, today: NaiveDate) -> Vec<StockAlert> {
        self.records
            .iter()
            .filter_map(|record| alerts::expiring_soon(record, today, self.rules))
            .inspect(|alert| tracing::warn!("{}", alert))
            .collect()
    }

    /// Flags every record whose quantity is below the low-stock threshold.
    #[must_use]
    pub fn check_low_stock(&self) -> Vec<StockAlert> {
        self.records
            .iter()
            .filter_map(|record| alerts::low_stock(record, self.rules))
            .inspect(|alert| tracing::warn!("{}", alert))
            .collect()
    }

    /// Removes every record whose expiry date is strictly before `today`.
    ///
    /// Walks the records from the back so removals never shift an index that is
    /// still to be visited. Records with unparsable dates are kept.
    pub fn purge_expired(&mut self, today: NaiveDate) -> Vec<ProductRecord> {
        let mut purged = Vec::new();
        for index in (0..self.records.len()).rev() {
            if self.records[index].is_expired(today) {
                let removed = self.records.remove(index);
                tracing::info!(
                    "Purged expired product '{}' (expired {})",
                    removed.name,
                    removed.expiry
                );
                purged.push(removed);
            }
        }
        purged.reverse();
        purged
    }

    /// Drops every in-memory record and reloads from the file, then runs the expiry
    /// check, the low-stock check and the purge, in that order.
    pub fn refresh(&mut self, today: NaiveDate) -> RefreshReport {
        self.records.clear();
        let load = self.load();
        let mut warnings = self.check_expiring_soon(today);
        warnings.extend(self.check_low_stock());
        let purged = self.purge_expired(today);

        RefreshReport {
            load,
            alerts: warnings,
            purged,
        }
    }
}
