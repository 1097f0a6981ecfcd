//! Taxed Token Engine CLI
//!
//! Command-line interface for replaying token operation journals.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- journal.csv > accounts.csv
//! cargo run -- --strategy sync journal.csv > accounts.csv
//! cargo run -- --owner deployer --total-supply 1000000000 --liquidity-manager lm journal.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 journal.csv > accounts.csv
//! RUST_LOG=debug cargo run -- journal.csv
//! ```
//!
//! The program creates a token from the genesis flags, replays the journal
//! through the selected processing strategy, and writes the final account
//! states to stdout. Logs go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Synchronous CSV parsing with single-threaded processing
//! - **async**: Asynchronous batch processing with lane parallelism (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid genesis, file not found, output failure, etc.)

use std::process;
use taxed_token_engine::cli;
use taxed_token_engine::strategy;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), args.to_genesis(), config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        tracing::error!(error = %e, "processing failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
