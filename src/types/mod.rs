//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `address`: Account identifiers
//! - `amount`: Fixed-point token amounts and timestamps
//! - `account`: Account state and trade windows
//! - `config`: Genesis inputs and the process-wide configuration record
//! - `operation`: Operations replayed against the engine
//! - `error`: Error types for the token engine

pub mod account;
pub mod address;
pub mod amount;
pub mod config;
pub mod error;
pub mod operation;

pub use account::{Account, TradeWindow};
pub use address::Address;
pub use amount::{
    format_token_amount, parse_token_amount, tokens, Timestamp, TokenAmount, DECIMALS, ONE_TOKEN,
    SECONDS_PER_DAY,
};
pub use config::{
    FeeMode, TokenConfig, TokenGenesis, DEFAULT_DAILY_MAX_TRADE_AMOUNT,
    DEFAULT_DAILY_TRADE_LIMIT_COUNT, DEFAULT_TAX_RATE_BPS, MAX_TAX_RATE_BPS,
};
pub use error::LedgerError;
pub use operation::{OperationRecord, OperationType};
