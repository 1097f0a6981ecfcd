//! Taxed Token Engine Library
//! # Overview
//!
//! This library implements a fungible token ledger with a transfer tax and
//! per-sender trade limits, plus a streaming CSV journal replayer with both
//! a sync and an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Address, Account, TokenConfig, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Account balances and total supply
//!   - [`core::fee_policy`] - Tax computation and fee exemption
//!   - [`core::trade_limit`] - Rolling daily trade windows
//!   - [`core::transfer`] - Atomic transfer orchestration
//!   - [`core::admin`] - Owner-gated configuration changes
//!   - [`core::engine`] - Sequential engine facade
//! - [`liquidity`] - Liquidity manager process behind an AMM router trait
//! - [`io`] - Journal reading and report writing
//! - [`strategy`] - Sync and async replay pipelines
//!
//! # Transfers
//!
//! Every transfer between two non-exempt accounts:
//!
//! - is capped at the daily maximum trade amount
//! - counts against the sender's rolling 24-hour trade window
//! - pays `floor(amount * tax_rate_bps / 10_000)` to the liquidity manager
//!
//! An exempt sender or receiver skips tax and both limits. A transfer is
//! all-or-nothing: either every balance and the sender's window change, or
//! nothing does.
//!
//! # Administration
//!
//! The owner can replace the liquidity manager, the trade limits and the
//! tax rate, toggle fee exemptions and hand over ownership. Any other
//! caller is rejected without side effects.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod liquidity;
pub mod strategy;
pub mod types;

pub use core::{AccountBook, Ledger, SharedTokenEngine, TokenEngine, TransferReceipt};
pub use io::write_accounts_csv;
pub use liquidity::{AmmRouter, LiquidityManager, LiquidityReport};
pub use types::{
    Account, Address, FeeMode, LedgerError, OperationRecord, OperationType, Timestamp,
    TokenAmount, TokenConfig, TokenGenesis, TradeWindow,
};
