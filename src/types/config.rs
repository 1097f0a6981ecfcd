//! Token configuration types
//!
//! [`TokenGenesis`] carries the constructor inputs of a token; [`TokenConfig`]
//! is the single process-wide configuration record that policy evaluation
//! reads and the administration surface mutates.

use super::address::Address;
use super::amount::{TokenAmount, ONE_TOKEN};
use clap::ValueEnum;

/// Largest accepted tax rate (100%)
pub const MAX_TAX_RATE_BPS: u32 = 10_000;

/// Default tax rate (5%)
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;

/// Default per-transfer principal cap (one million tokens)
pub const DEFAULT_DAILY_MAX_TRADE_AMOUNT: TokenAmount = 1_000_000 * ONE_TOKEN;

/// Default number of transfers per rolling window
pub const DEFAULT_DAILY_TRADE_LIMIT_COUNT: u32 = 10;

/// How the tax is charged on a taxed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FeeMode {
    /// Tax is carved out of the principal: sender loses `amount`,
    /// receiver gains `amount - tax`
    #[default]
    Deducted,

    /// Tax is charged on top of the principal: sender loses
    /// `amount + tax`, receiver gains `amount`
    Surcharge,
}

/// Process-wide token configuration
///
/// `version` starts at 0 and increases by one on every successful
/// administration mutation, so a snapshot identifies exactly which
/// configuration a transfer was evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// Administrator identity
    pub owner: Address,

    /// Tax rate in basis points, at most [`MAX_TAX_RATE_BPS`]
    pub tax_rate_bps: u32,

    /// Account that receives routed tax
    pub liquidity_manager: Address,

    /// Upper bound on a single transfer's principal for non-exempt parties
    pub daily_max_trade_amount: TokenAmount,

    /// Maximum transfers per sender within one rolling window
    pub daily_trade_limit_count: u32,

    /// Fixed at construction
    pub total_supply: TokenAmount,

    /// Tax charging mode
    pub fee_mode: FeeMode,

    /// Configuration version
    pub version: u64,
}

/// Constructor inputs for a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGenesis {
    /// Initial owner, receives the whole supply
    pub owner: Address,
    /// Total supply in base units
    pub total_supply: TokenAmount,
    /// Initial liquidity manager (marked fee-exempt)
    pub liquidity_manager: Address,
    /// Initial tax rate
    pub tax_rate_bps: u32,
    /// Initial per-transfer cap
    pub daily_max_trade_amount: TokenAmount,
    /// Initial per-window count cap
    pub daily_trade_limit_count: u32,
    /// Tax charging mode
    pub fee_mode: FeeMode,
    /// Additional accounts exempt from the start
    pub fee_exempt: Vec<Address>,
}

impl TokenGenesis {
    /// Create a genesis with default tax and limit settings
    pub fn new(owner: Address, total_supply: TokenAmount, liquidity_manager: Address) -> Self {
        TokenGenesis {
            owner,
            total_supply,
            liquidity_manager,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            daily_max_trade_amount: DEFAULT_DAILY_MAX_TRADE_AMOUNT,
            daily_trade_limit_count: DEFAULT_DAILY_TRADE_LIMIT_COUNT,
            fee_mode: FeeMode::default(),
            fee_exempt: Vec::new(),
        }
    }

    /// Build the initial configuration record (version 0)
    pub fn to_config(&self) -> TokenConfig {
        TokenConfig {
            owner: self.owner.clone(),
            tax_rate_bps: self.tax_rate_bps,
            liquidity_manager: self.liquidity_manager.clone(),
            daily_max_trade_amount: self.daily_max_trade_amount,
            daily_trade_limit_count: self.daily_trade_limit_count,
            total_supply: self.total_supply,
            fee_mode: self.fee_mode,
            version: 0,
        }
    }
}
