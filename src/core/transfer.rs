//! Transfer orchestration
//!
//! Composes the trade limit controller, the fee policy and the ledger into
//! the single all-or-nothing transfer operation:
//!
//! 1. Reject a zero amount
//! 2. Evaluate the sender's limits (skipped for exempt parties)
//! 3. Quote the tax
//! 4. Debit the sender
//! 5. Credit the receiver
//! 6. Credit the liquidity manager with the tax, if any
//! 7. Commit the sender's trade window
//!
//! Steps 1-3 are pure. If step 5 or 6 fails, the steps already applied are
//! compensated in reverse order before the error is returned, and the
//! window from step 2 is never committed, so a failed transfer leaves every
//! balance and every window exactly as it found them.

use crate::core::fee_policy;
use crate::core::trade_limit;
use crate::core::traits::Ledger;
use crate::types::{Address, LedgerError, Timestamp, TokenAmount, TokenConfig, TradeWindow};

/// Outcome of a committed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Sender
    pub from: Address,
    /// Receiver
    pub to: Address,
    /// Requested principal
    pub amount: TokenAmount,
    /// Tax routed to `liquidity_manager`
    pub tax: TokenAmount,
    /// Amount removed from the sender
    pub debited: TokenAmount,
    /// Amount delivered to the receiver
    pub credited: TokenAmount,
    /// Account that received the tax
    pub liquidity_manager: Address,
    /// Sender window after the transfer, `None` for exempt transfers
    pub window: Option<TradeWindow>,
    /// Configuration version the transfer was evaluated against
    pub config_version: u64,
}

/// Execute a transfer against any [`Ledger`]
///
/// # Errors
///
/// - `InvalidAmount` for a zero amount
/// - `TradeAmountExceeded` / `TradeLimitExceeded` from the limit controller
/// - `InsufficientBalance` if the sender cannot cover the debit
/// - `Overflow` if a credit would exceed the representable maximum
pub fn execute_transfer<L: Ledger + ?Sized>(
    ledger: &mut L,
    config: &TokenConfig,
    from: &Address,
    to: &Address,
    amount: TokenAmount,
    now: Timestamp,
) -> Result<TransferReceipt, LedgerError> {
    if amount == 0 {
        return Err(LedgerError::invalid_amount(from, amount));
    }

    let sender = ledger.account(from);
    let receiver = ledger.account(to);

    let window = trade_limit::evaluate(&sender, &receiver, amount, config, now)?;
    let quote = fee_policy::quote(&sender, &receiver, amount, config)?;
    let manager = &config.liquidity_manager;

    ledger.debit(from, quote.debit)?;

    if let Err(err) = ledger.credit(to, quote.credit) {
        ledger.credit(from, quote.debit)?;
        return Err(err);
    }

    if quote.tax > 0 {
        if let Err(err) = ledger.credit(manager, quote.tax) {
            ledger.debit(to, quote.credit)?;
            ledger.credit(from, quote.debit)?;
            return Err(err);
        }
    }

    if let Some(window) = window {
        ledger.set_trade_window(from, window);
    }

    Ok(TransferReceipt {
        from: from.clone(),
        to: to.clone(),
        amount,
        tax: quote.tax,
        debited: quote.debit,
        credited: quote.credit,
        liquidity_manager: manager.clone(),
        window,
        config_version: config.version,
    })
}
