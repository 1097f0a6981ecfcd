//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over operation records from a journal file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read and deserialize CSV records
//! sequentially, one at a time, without loading the entire file into memory.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<OperationRecord, String>` for each CSV row:
//!
//! ```no_run
//! use taxed_token_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("journal.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Replaying {}", record.kind.name()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::OperationRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over operation records.
/// Maintains streaming behavior with constant memory usage.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns may be omitted)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<OperationRecord, String>;

    /// Get the next operation record from the journal
    ///
    /// # Returns
    ///
    /// * `Some(Ok(OperationRecord))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // +1 for the header row
                Some(
                    convert_csv_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, OperationType, ONE_TOKEN};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "type,caller,account,amount,value,time\n";

    /// Helper function to create a temporary journal file for testing
    fn create_temp_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .expect("Failed to write to temp file");
        file.write_all(rows.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_transfer() {
        let file = create_temp_csv("transfer,owner,alice,100,,1700000000\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 1);
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.caller, Address::from("owner"));
        assert_eq!(record.time, 1_700_000_000);
        assert_eq!(
            record.kind,
            OperationType::Transfer {
                to: Address::from("alice"),
                amount: 100 * ONE_TOKEN
            }
        );
    }

    #[test]
    fn test_sync_reader_handles_all_operation_types() {
        let file = create_temp_csv(
            "set_liquidity_manager,owner,lm,,,1\n\
             set_trade_limit,owner,,1000000,10,2\n\
             set_tax_rate,owner,,,500,3\n\
             exclude_from_fee,owner,alice,,,4\n\
             include_in_fee,owner,alice,,,5\n\
             transfer_ownership,owner,alice,,,6\n\
             transfer,alice,bob,1.5,,7\n",
        );

        let names: Vec<_> = SyncReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .map(|record| record.kind.name())
            .collect();

        assert_eq!(
            names,
            vec![
                "set_liquidity_manager",
                "set_trade_limit",
                "set_tax_rate",
                "exclude_from_fee",
                "include_in_fee",
                "transfer_ownership",
                "transfer",
            ]
        );
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let file = create_temp_csv(
            "transfer,owner,alice,1,,1\n\
             transfer,owner,bob,invalid,,2\n\
             transfer,owner,carol,1,,3\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[2].is_ok());
        let error = records[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3"));
        assert!(error.contains("Invalid token amount"));
    }

    #[test]
    fn test_sync_reader_reports_unparseable_time() {
        let file = create_temp_csv("transfer,owner,alice,1,,yesterday\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        let error = records[0].as_ref().unwrap_err();
        assert!(error.contains("CSV parse error"));
    }

    #[test]
    fn test_sync_reader_handles_whitespace() {
        let file = create_temp_csv("  transfer  ,  owner  ,  alice  ,  2.5  ,  ,  9  \n");

        let records: Vec<_> = SyncReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time, 9);
        assert_eq!(
            records[0].kind,
            OperationType::Transfer {
                to: Address::from("alice"),
                amount: 2 * ONE_TOKEN + ONE_TOKEN / 2
            }
        );
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("");

        assert_eq!(SyncReader::new(file.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_sync_reader_continues_after_error() {
        let file = create_temp_csv(
            "transfer,owner,alice,1,,1\n\
             burn,owner,,1,,2\n\
             transfer,owner,carol,1,,3\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[1].is_err());
        assert!(records[2].is_ok());
    }
}
