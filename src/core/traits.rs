//! Core trait for ledger bookkeeping
//!
//! The same transfer orchestration runs over a sequential `HashMap` book and
//! a concurrent `DashMap` book; this trait is the seam between them.

use crate::types::{Account, Address, LedgerError, TokenAmount, TradeWindow};

/// Account bookkeeping primitives
///
/// `debit` and `credit` are the only operations that change balances, which
/// keeps "sum of balances == total supply" a property of these two methods
/// alone. Unseen addresses read as the zero-value [`Account`].
pub trait Ledger {
    /// Snapshot of an account, zero-valued if never touched
    fn account(&self, address: &Address) -> Account;

    /// Current balance of an account
    fn balance_of(&self, address: &Address) -> TokenAmount;

    /// Total supply fixed at construction
    fn total_supply(&self) -> TokenAmount;

    /// Decrease a balance, failing with `InsufficientBalance` if it would go negative
    fn debit(&mut self, address: &Address, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Increase a balance, failing with `Overflow` past the representable maximum
    fn credit(&mut self, address: &Address, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Set or clear an account's fee exemption
    fn set_fee_exempt(&mut self, address: &Address, exempt: bool);

    /// Replace an account's trade window
    fn set_trade_window(&mut self, address: &Address, window: TradeWindow);

    /// Snapshot of every account ever touched, sorted by address
    fn accounts(&self) -> Vec<Account>;
}
