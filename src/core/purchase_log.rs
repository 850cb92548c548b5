//! Purchase log - append-only text file of committed purchases.
//!
//! Every append opens the file, writes one whole receipt block, syncs it to disk
//! and closes the file again, so nothing is buffered between purchases.

use crate::{entities::PurchaseReceipt, errors::Result};
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

/// Handle on the purchase log file.
#[derive(Clone, Debug)]
pub struct PurchaseLog {
    path: PathBuf,
}

impl PurchaseLog {
    /// Creates a handle; the file is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the receipt block and waits until it is on disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, written or synced.
    pub fn append(&self, receipt: &PurchaseReceipt) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(receipt.to_string().as_bytes())?;
        file.sync_data()?;
        Ok(())
    }
}
