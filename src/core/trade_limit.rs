//! Trade limit controller
//!
//! Tracks a rolling 24 hour window per sending account and enforces both a
//! per-transfer principal cap and a transfer count cap within the window.
//!
//! # Window States
//!
//! - **Fresh**: no window yet, or `now - window_start >= 86400`. The next
//!   transfer opens a new window with `trade_count = 1`.
//! - **Active**: window open. The next transfer increments `trade_count`,
//!   unless that would exceed the configured limit.
//!
//! Expiry is evaluated, never stored: a stale window simply reads as Fresh.
//! Only the sender's window is consulted; receiving consumes no quota.
//! If either party is fee-exempt, both caps are bypassed.

use crate::types::{
    Account, LedgerError, Timestamp, TokenAmount, TokenConfig, TradeWindow, SECONDS_PER_DAY,
};

/// Evaluated state of a sender's trade window at a given time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// No open window
    Fresh,
    /// Window open since `window_start`
    Active(TradeWindow),
}

/// Evaluate a stored window against the current time
pub fn window_state(window: Option<TradeWindow>, now: Timestamp) -> WindowState {
    match window {
        Some(window) if now.saturating_sub(window.window_start) < SECONDS_PER_DAY => {
            WindowState::Active(window)
        }
        _ => WindowState::Fresh,
    }
}

/// Check a transfer against the sender's limits
///
/// Pure: nothing is recorded here. On success returns the window the
/// orchestrator must commit for the sender once the ledger mutation
/// succeeds, or `None` when the transfer is exempt and leaves the window
/// untouched.
///
/// # Errors
///
/// - `TradeAmountExceeded` if `amount > daily_max_trade_amount`
/// - `TradeLimitExceeded` if the active window already holds
///   `daily_trade_limit_count` transfers
pub fn evaluate(
    sender: &Account,
    receiver: &Account,
    amount: TokenAmount,
    config: &TokenConfig,
    now: Timestamp,
) -> Result<Option<TradeWindow>, LedgerError> {
    if sender.fee_exempt || receiver.fee_exempt {
        return Ok(None);
    }

    if amount > config.daily_max_trade_amount {
        return Err(LedgerError::trade_amount_exceeded(
            &sender.address,
            amount,
            config.daily_max_trade_amount,
        ));
    }

    let next = match window_state(sender.trade_window, now) {
        WindowState::Fresh => TradeWindow {
            window_start: now,
            trade_count: 1,
        },
        WindowState::Active(window) => {
            if window.trade_count >= config.daily_trade_limit_count {
                return Err(LedgerError::trade_limit_exceeded(
                    &sender.address,
                    config.daily_trade_limit_count,
                ));
            }
            TradeWindow {
                window_start: window.window_start,
                trade_count: window.trade_count + 1,
            }
        }
    };

    Ok(Some(next))
}
