//! Benchmark suite for comparing processing strategies
//!
//! This benchmark compares the performance of synchronous and asynchronous
//! journal replay using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! # Benchmark Fixtures
//!
//! Three generated journals are used:
//! - `benchmark_small.csv` - 100 operations over 20 accounts
//! - `benchmark_medium.csv` - 1,000 operations over 100 accounts
//! - `benchmark_large.csv` - 100,000 operations over 2,000 accounts
//!
//! Each journal funds its accounts from the owner, then mixes random
//! transfers with occasional tax rate and exemption changes.

use std::path::Path;
use taxed_token_engine::cli::StrategyType;
use taxed_token_engine::strategy::{create_strategy, BatchConfig};
use taxed_token_engine::types::{tokens, Address, TokenGenesis};

fn main() {
    divan::main();
}

const FIXTURES: [&str; 3] = [
    "benches/fixtures/benchmark_small.csv",
    "benches/fixtures/benchmark_medium.csv",
    "benches/fixtures/benchmark_large.csv",
];

fn genesis() -> TokenGenesis {
    let mut genesis = TokenGenesis::new(
        Address::from("owner"),
        tokens(1_000_000_000).unwrap(),
        Address::from("liquidity-manager"),
    );
    // Random journals would otherwise exhaust the daily quota early
    genesis.daily_trade_limit_count = u32::MAX;
    genesis
}

#[divan::bench(args = FIXTURES)]
fn sync_strategy(fixture: &str) {
    let strategy = create_strategy(StrategyType::Sync, genesis(), None);
    let mut output = Vec::new();

    strategy
        .process(Path::new(fixture), &mut output)
        .expect("Processing failed");
}

#[divan::bench(args = FIXTURES)]
fn async_strategy(fixture: &str) {
    let strategy = create_strategy(StrategyType::Async, genesis(), Some(BatchConfig::default()));
    let mut output = Vec::new();

    strategy
        .process(Path::new(fixture), &mut output)
        .expect("Processing failed");
}

/// Small batches put more administration barriers and lane splits on the
/// critical path
#[divan::bench(args = [10, 100, 1000, 10000])]
fn async_strategy_batch_size(batch_size: usize) {
    let strategy = create_strategy(
        StrategyType::Async,
        genesis(),
        Some(BatchConfig::new(batch_size, num_cpus::get())),
    );
    let mut output = Vec::new();

    strategy
        .process(Path::new(FIXTURES[2]), &mut output)
        .expect("Processing failed");
}
