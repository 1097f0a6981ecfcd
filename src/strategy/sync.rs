//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates journal replay by coordinating
//! between the SyncReader (for CSV input) and TokenEngine (for business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Operation processing to `TokenEngine` (business logic)
//! - CSV output to `csv_format::write_accounts_csv` (format handling)
//!
//! # Memory Efficiency
//!
//! Records are streamed one at a time; memory usage is O(accounts), not
//! O(journal length).

use crate::core::TokenEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::TokenGenesis;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// Replays a journal against a fresh token created from `genesis`.
///
/// # Examples
///
/// ```no_run
/// use taxed_token_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use taxed_token_engine::types::{tokens, Address, TokenGenesis};
/// use std::path::Path;
/// use std::io;
///
/// let genesis = TokenGenesis::new(
///     Address::from("owner"),
///     tokens(1_000_000_000).unwrap(),
///     Address::from("liquidity-manager"),
/// );
/// let strategy = SyncProcessingStrategy::new(genesis);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("journal.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    genesis: TokenGenesis,
}

impl SyncProcessingStrategy {
    pub fn new(genesis: TokenGenesis) -> Self {
        Self { genesis }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Replay the journal at `input_path` and write the account report
    ///
    /// 1. Creates the token from the genesis parameters
    /// 2. Streams records through a SyncReader
    /// 3. Processes each record through the engine
    /// 4. Writes the final account states
    ///
    /// # Error Handling
    ///
    /// Invalid genesis parameters and I/O failures are fatal. Malformed
    /// records and rejected operations are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let mut engine = TokenEngine::new(&self.genesis)
            .map_err(|e| format!("Invalid genesis configuration: {}", e))?;

        let reader = SyncReader::new(input_path)?;

        let mut processed = 0usize;
        let mut rejected = 0usize;
        for result in reader {
            match result {
                Ok(record) => {
                    processed += 1;
                    if let Err(e) = engine.process(&record) {
                        rejected += 1;
                        tracing::warn!(
                            operation = record.kind.name(),
                            caller = %record.caller,
                            time = record.time,
                            error = %e,
                            "operation rejected"
                        );
                    }
                }
                Err(e) => tracing::warn!(error = %e, "skipping journal record"),
            }
        }
        tracing::info!(processed, rejected, "journal replayed");

        write_accounts_csv(&engine.get_accounts(), output)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, ONE_TOKEN};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary journal for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn strategy() -> SyncProcessingStrategy {
        SyncProcessingStrategy::new(TokenGenesis::new(
            Address::from("owner"),
            1_000 * ONE_TOKEN,
            Address::from("lm"),
        ))
    }

    fn run(strategy: &SyncProcessingStrategy, content: &str) -> String {
        let file = create_temp_csv(content);
        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_sync_strategy_reports_taxed_transfer() {
        let output = run(
            &strategy(),
            "type,caller,account,amount,value,time\ntransfer,owner,alice,100,,1000\n",
        );

        assert_eq!(
            output,
            "account,balance,fee_exempt,window_start,trade_count\n\
             alice,95,false,,0\n\
             lm,5,true,,0\n\
             owner,900,false,1000,1\n"
        );
    }

    #[test]
    fn test_sync_strategy_without_operations_reports_genesis() {
        let output = run(&strategy(), "type,caller,account,amount,value,time\n");

        assert_eq!(
            output,
            "account,balance,fee_exempt,window_start,trade_count\n\
             lm,0,true,,0\n\
             owner,1000,false,,0\n"
        );
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let mut output = Vec::new();

        let result = strategy().process(Path::new("nonexistent.csv"), &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_strategy_rejects_invalid_genesis() {
        let mut genesis = TokenGenesis::new(Address::from("owner"), ONE_TOKEN, Address::from("lm"));
        genesis.tax_rate_bps = 10_001;
        let file = create_temp_csv("type,caller,account,amount,value,time\n");
        let mut output = Vec::new();

        let result = SyncProcessingStrategy::new(genesis).process(file.path(), &mut output);
        assert!(result.unwrap_err().contains("Invalid genesis configuration"));
    }

    #[test]
    fn test_sync_strategy_continues_after_rejections() {
        let output = run(
            &strategy(),
            "type,caller,account,amount,value,time\n\
             transfer,owner,alice,abc,,1\n\
             transfer,alice,bob,1,,2\n\
             set_tax_rate,alice,,,0,3\n\
             transfer,owner,carol,10,,4\n",
        );

        assert!(output.contains("carol,9.5,false,,0"));
        assert!(!output.contains("alice"));
        assert!(!output.contains("bob"));
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
