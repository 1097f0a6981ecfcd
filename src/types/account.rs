//! Account-related types for the token ledger
//!
//! This module defines the per-account state: balance, fee exemption flag
//! and the rolling trade window tracked for the account as a sender.

use super::address::Address;
use super::amount::{Timestamp, TokenAmount};

/// Rolling trade window of a sending account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeWindow {
    /// Time of the first transfer that opened the window
    pub window_start: Timestamp,

    /// Transfers recorded since `window_start`
    pub trade_count: u32,
}

/// Account state
///
/// Accounts come into existence on first touch with the zero value:
/// balance 0, not exempt, no trade window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The account address
    pub address: Address,

    /// Balance in base units
    ///
    /// Only the ledger's `debit` and `credit` primitives change this value.
    pub balance: TokenAmount,

    /// Whether transfers involving this account skip tax and trade limits
    pub fee_exempt: bool,

    /// Rolling trade window, `None` until the first limited transfer
    pub trade_window: Option<TradeWindow>,
}

impl Account {
    /// Create a new account with the zero-value state
    ///
    /// # Arguments
    ///
    /// * `address` - The address for this account
    ///
    /// # Returns
    ///
    /// A new Account with:
    /// - balance = 0
    /// - fee_exempt = false
    /// - trade_window = None
    pub fn new(address: Address) -> Self {
        Account {
            address,
            balance: 0,
            fee_exempt: false,
            trade_window: None,
        }
    }
}
