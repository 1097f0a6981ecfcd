//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It replays the journal in batches, running the
//! independent lanes of each batch in parallel.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (lane partitioning + tokio tasks)
//!     └── SharedTokenEngine (thread-safe processing)
//!         └── SharedAccountBook (thread-safe account state)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another, so journal order is kept
//!   across batch boundaries
//! - Within a batch, administration operations are barriers and transfers
//!   are split into lanes that share no account
//! - The final report equals the one the sync strategy produces

use crate::core::r#async::{BatchProcessor, SharedTokenEngine};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::TokenGenesis;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how operations are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// # Configuration
///
/// - `batch_size`: Number of operations per batch (default: 1000)
/// - `max_concurrent_batches`: Number of worker threads (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    genesis: TokenGenesis,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, genesis: TokenGenesis) -> Self {
        Self { config, genesis }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Replay the journal at `input_path` and write the account report
    ///
    /// 1. Creates a SharedTokenEngine from the genesis parameters
    /// 2. Creates a tokio multi-threaded runtime
    /// 3. Reads operations in batches using AsyncReader
    /// 4. Processes each batch to completion before reading the next
    /// 5. Writes the final account states
    ///
    /// # Error Handling
    ///
    /// Invalid genesis parameters, runtime creation and I/O failures are
    /// fatal. Malformed records and rejected operations are logged and
    /// skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = Arc::new(
            SharedTokenEngine::new(&self.genesis)
                .map_err(|e| format!("Invalid genesis configuration: {}", e))?,
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let processor = BatchProcessor::new(Arc::clone(&engine));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io, tokio files implement tokio::io
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut processed = 0usize;
            let mut rejected = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for result in processor.process_batch(batch).await {
                    processed += 1;
                    if let Err(e) = result.result {
                        rejected += 1;
                        tracing::warn!(
                            operation = result.record.kind.name(),
                            caller = %result.record.caller,
                            time = result.record.time,
                            error = %e,
                            "operation rejected"
                        );
                    }
                }
            }
            tracing::info!(processed, rejected, "journal replayed");

            write_accounts_csv(&engine.get_accounts(), output)?;

            Ok(())
        })
    }
}
