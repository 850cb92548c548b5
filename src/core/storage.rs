//! Ledger file format - reading and writing product records as delimited text.
//!
//! The ledger is a headerless text file with one product per line and six
//! comma-separated fields in the order `name, price, barcode, quantity, expiry,
//! restock`. Rows that cannot be turned into a record are collected with their line
//! number instead of aborting the whole read.

use crate::{
    entities::{ProductFields, ProductRecord},
    errors::{Error, Result},
};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::{
    fs::File,
    io::{self, BufRead, Write},
    path::Path,
};

/// A ledger line that could not be loaded.
#[derive(Debug)]
pub struct RejectedRow {
    /// 1-based line number in the ledger file
    pub line: u64,
    /// Why the line was rejected
    pub error: Error,
}

/// Result of reading a ledger: the good records in file order plus the rejects.
#[derive(Debug, Default)]
pub struct LedgerRows {
    /// Records parsed successfully, in file order
    pub records: Vec<ProductRecord>,
    /// Lines that were skipped
    pub rejected: Vec<RejectedRow>,
}

/// Reads ledger rows from any buffered reader.
///
/// Every physical line is parsed on its own, so a stray quote can only spoil the
/// line it sits on. Blank lines are ignored. A read failure from the underlying
/// reader stops the read; everything parsed before it is kept.
pub fn read_ledger<R: BufRead>(reader: R) -> LedgerRows {
    let mut rows = LedgerRows::default();
    let mut line: u64 = 0;

    for bytes in reader.split(b'\n') {
        line += 1;
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Stopped reading ledger at line {}: {}", line, e);
                break;
            }
        };
        match parse_line(&bytes, line) {
            Ok(Some(product)) => rows.records.push(product),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!("Skipping ledger line {}: {}", line, error);
                rows.rejected.push(RejectedRow { line, error });
            }
        }
    }

    rows
}

/// Reads the ledger file at `path`.
///
/// A missing file is an empty ledger. Any other open failure is logged and also
/// treated as an empty ledger, so startup never fails because of the data file.
pub fn read_ledger_file(path: &Path) -> LedgerRows {
    match File::open(path) {
        Ok(file) => read_ledger(io::BufReader::new(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("Ledger file {:?} not found, starting empty", path);
            LedgerRows::default()
        }
        Err(e) => {
            tracing::warn!("Could not open ledger file {:?}: {}", path, e);
            LedgerRows::default()
        }
    }
}

/// Writes records to any writer, one line per record.
///
/// # Errors
/// Returns an error if the writer fails.
pub fn write_ledger<W: Write>(writer: W, records: &[ProductRecord]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in records {
        wtr.write_record(record.to_fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Overwrites the ledger file at `path` with `records`.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_ledger_file(path: &Path, records: &[ProductRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_ledger(io::BufWriter::new(file), records)
}

/// Parses one physical line. `None` for a blank line.
fn parse_line(bytes: &[u8], line: u64) -> Result<Option<ProductRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut record = StringRecord::new();
    if !rdr.read_record(&mut record)? {
        return Ok(None);
    }
    parse_row(&record, line).map(Some)
}

fn parse_row(record: &StringRecord, line: u64) -> Result<ProductRecord> {
    let fields: Vec<&str> = record.iter().collect();
    let fields = ProductFields::from_slice(&fields).ok_or_else(|| Error::MalformedRow {
        line,
        fields: record.len(),
    })?;
    ProductRecord::from_fields(fields)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{SAMPLE_LEDGER, scratch_dir};
    use std::io::Cursor;

    #[test]
    fn test_read_keeps_file_order() {
        let rows = read_ledger(Cursor::new(SAMPLE_LEDGER));

        assert!(rows.rejected.is_empty());
        let names: Vec<&str> = rows.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Bread", "Eggs", "Old Cheese"]);
    }

    #[test]
    fn test_read_collects_bad_rows() {
        let input = "Milk,4.50,1001,10,01/01/2099,01/01/2030\n\
                     Broken,abc,1002,3,01/01/2099,01/01/2030\n\
                     Short,1.00,1003\n\
                     Eggs,3.20,1004,12,15/11/2026,01/11/2026\n";
        let rows = read_ledger(Cursor::new(input));

        assert_eq!(rows.records.len(), 2);
        assert_eq!(rows.records[1].name, "Eggs");
        assert_eq!(rows.rejected.len(), 2);
        assert_eq!(rows.rejected[0].line, 2);
        assert!(matches!(
            rows.rejected[0].error,
            Error::InvalidField { field: "price", .. }
        ));
        assert_eq!(rows.rejected[1].line, 3);
        assert!(matches!(
            rows.rejected[1].error,
            Error::MalformedRow { line: 3, fields: 3 }
        ));
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let input = "Milk,4.50,1001,10,01/01/2099,01/01/2030\n\n\nBread,2.00,1002,3,01/01/2099,\n";
        let rows = read_ledger(Cursor::new(input));
        assert_eq!(rows.records.len(), 2);
        assert_eq!(rows.records[1].restock.as_str(), "");
    }

    #[test]
    fn test_stray_quote_spoils_only_its_line() {
        let input = "\"Special Milk,4.50,1001,10,01/01/2099,01/01/2030\n\
                     Bread,2.00,1002,3,01/01/2099,01/01/2030\n\
                     Eggs,3.20,1003,12,20/10/2026,01/11/2026\n";
        let rows = read_ledger(Cursor::new(input));

        let names: Vec<&str> = rows.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bread", "Eggs"]);
        assert_eq!(rows.rejected.len(), 1);
        assert_eq!(rows.rejected[0].line, 1);
    }

    #[test]
    fn test_invalid_utf8_line_is_rejected() {
        let mut input = b"Milk,4.50,1001,10,01/01/2099,01/01/2030\n".to_vec();
        input.extend_from_slice(b"Bad\xff,1.00,1002,3,01/01/2099,01/01/2030\n");
        input.extend_from_slice(b"Eggs,3.20,1003,12,20/10/2026,01/11/2026\n");
        let rows = read_ledger(Cursor::new(input));

        assert_eq!(rows.records.len(), 2);
        assert_eq!(rows.rejected.len(), 1);
        assert_eq!(rows.rejected[0].line, 2);
        assert!(matches!(rows.rejected[0].error, Error::Csv(_)));
    }

    #[test]
    fn test_write_plain_lines() -> Result<()> {
        let rows = read_ledger(Cursor::new(SAMPLE_LEDGER));
        let mut out = Vec::new();
        write_ledger(&mut out, &rows.records)?;

        assert_eq!(String::from_utf8(out).unwrap(), SAMPLE_LEDGER);
        Ok(())
    }

    #[test]
    fn test_name_with_comma_survives() -> Result<()> {
        let record = ProductRecord::from_fields(ProductFields {
            name: "Cheese, aged",
            ..crate::test_utils::milk_fields()
        })?;
        let mut out = Vec::new();
        write_ledger(&mut out, std::slice::from_ref(&record))?;

        let rows = read_ledger(Cursor::new(out));
        assert_eq!(rows.records, vec![record]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = scratch_dir();
        let rows = read_ledger_file(&dir.path().join("absent.txt"));
        assert!(rows.records.is_empty());
        assert!(rows.rejected.is_empty());
    }

    #[test]
    fn test_write_then_read_file() -> Result<()> {
        let dir = scratch_dir();
        let path = dir.path().join("banco.txt");
        let records = read_ledger(Cursor::new(SAMPLE_LEDGER)).records;

        write_ledger_file(&path, &records)?;
        let reloaded = read_ledger_file(&path);

        assert_eq!(reloaded.records, records);
        Ok(())
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = scratch_dir();
        let path = dir.path().join("no-such-dir").join("banco.txt");
        let result = write_ledger_file(&path, &[]);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
