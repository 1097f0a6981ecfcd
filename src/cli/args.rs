use crate::strategy::BatchConfig;
use crate::types::{
    parse_token_amount, Address, FeeMode, TokenAmount, TokenGenesis, DEFAULT_DAILY_TRADE_LIMIT_COUNT,
    DEFAULT_TAX_RATE_BPS,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay a taxed token operation journal
#[derive(Parser, Debug)]
#[command(name = "taxed-token-engine")]
#[command(about = "Replay a taxed token operation journal and report final balances", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "INPUT", help = "Path to the input journal CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for the journal
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of operations per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of operations per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Initial owner; receives the whole supply
    #[arg(long = "owner", value_name = "ADDRESS", default_value = "owner")]
    pub owner: Address,

    /// Total supply in tokens
    #[arg(
        long = "total-supply",
        value_name = "TOKENS",
        default_value = "1000000000",
        value_parser = parse_token_amount
    )]
    pub total_supply: TokenAmount,

    /// Initial liquidity manager
    #[arg(
        long = "liquidity-manager",
        value_name = "ADDRESS",
        default_value = "liquidity-manager"
    )]
    pub liquidity_manager: Address,

    /// Initial tax rate in basis points
    #[arg(long = "tax-rate-bps", value_name = "BPS", default_value_t = DEFAULT_TAX_RATE_BPS)]
    pub tax_rate_bps: u32,

    /// Initial per-transfer cap in tokens
    #[arg(
        long = "max-trade-amount",
        value_name = "TOKENS",
        default_value = "1000000",
        value_parser = parse_token_amount
    )]
    pub max_trade_amount: TokenAmount,

    /// Initial number of transfers allowed per sender per day
    #[arg(
        long = "max-trade-count",
        value_name = "COUNT",
        default_value_t = DEFAULT_DAILY_TRADE_LIMIT_COUNT
    )]
    pub max_trade_count: u32,

    /// How the tax is charged
    #[arg(long = "fee-mode", value_name = "MODE", value_enum, default_value_t = FeeMode::Deducted)]
    pub fee_mode: FeeMode,

    /// Accounts exempt from fees and limits from the start (repeatable)
    #[arg(long = "exempt", value_name = "ADDRESS")]
    pub exempt: Vec<Address>,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to defaults; zero values are replaced by
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Build the token genesis parameters from CLI arguments
    ///
    /// Values are validated when the engine is created, not here.
    pub fn to_genesis(&self) -> TokenGenesis {
        TokenGenesis {
            owner: self.owner.clone(),
            total_supply: self.total_supply,
            liquidity_manager: self.liquidity_manager.clone(),
            tax_rate_bps: self.tax_rate_bps,
            daily_max_trade_amount: self.max_trade_amount,
            daily_trade_limit_count: self.max_trade_count,
            fee_mode: self.fee_mode,
            fee_exempt: self.exempt.clone(),
        }
    }
}
