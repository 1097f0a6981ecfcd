//! Error types for the token engine
//!
//! Every failure is a normal, expected outcome of policy enforcement and is
//! surfaced to the caller verbatim. A failed operation leaves all ledger and
//! configuration state unchanged.
//!
//! # Error Categories
//!
//! - **Validation Errors**: zero amounts, out-of-range rates and limits
//! - **Balance Errors**: insufficient balance, arithmetic overflow
//! - **Policy Errors**: per-transfer amount cap, rolling trade count cap
//! - **Authorization Errors**: non-owner administration calls
//! - **Collaborator Errors**: failures reported by the AMM router

use super::address::Address;
use super::amount::TokenAmount;
use thiserror::Error;

/// Main error type for the token engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Transfer of a zero amount
    #[error("Invalid transfer amount {amount} from {from}")]
    InvalidAmount {
        /// Sender of the rejected transfer
        from: Address,
        /// The rejected amount
        amount: TokenAmount,
    },

    /// Debit exceeds the account balance
    ///
    /// The transfer is rejected and no balance changes.
    #[error("Insufficient balance for {account}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Account being debited
        account: Address,
        /// Current balance
        balance: TokenAmount,
        /// Requested debit
        requested: TokenAmount,
    },

    /// Credit would exceed the representable maximum
    #[error("Arithmetic overflow in {operation} for {account}")]
    Overflow {
        /// Operation that would overflow
        operation: String,
        /// Account involved
        account: Address,
    },

    /// Single transfer above the daily maximum trade amount
    #[error("Trade amount {amount} from {from} exceeds maximum {max_amount}")]
    TradeAmountExceeded {
        /// Sender of the rejected transfer
        from: Address,
        /// Requested principal
        amount: TokenAmount,
        /// Configured cap
        max_amount: TokenAmount,
    },

    /// Transfer count in the rolling window would exceed the daily limit
    #[error("Daily trade limit of {limit} exceeded for {from}")]
    TradeLimitExceeded {
        /// Sender of the rejected transfer
        from: Address,
        /// Configured count cap
        limit: u32,
    },

    /// Administration call by someone other than the owner
    #[error("Unauthorized: {caller} cannot {operation}, only the owner can")]
    Unauthorized {
        /// Identity that attempted the call
        caller: Address,
        /// Operation that was attempted
        operation: String,
    },

    /// Tax rate above 10000 basis points
    #[error("Invalid tax rate {bps} bps, maximum is {max} bps")]
    InvalidRate {
        /// Requested rate
        bps: u32,
        /// Largest accepted rate
        max: u32,
    },

    /// Zero trade amount or trade count limit
    #[error("Invalid trade limit: max amount {max_amount}, max count {max_count}")]
    InvalidLimit {
        /// Requested amount cap
        max_amount: TokenAmount,
        /// Requested count cap
        max_count: u32,
    },

    /// The AMM router rejected a swap or liquidity call
    #[error("Router {operation} failed: {message}")]
    Router {
        /// Router operation that failed
        operation: String,
        /// Router-provided reason
        message: String,
    },
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(from: &Address, amount: TokenAmount) -> Self {
        LedgerError::InvalidAmount {
            from: from.clone(),
            amount,
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(
        account: &Address,
        balance: TokenAmount,
        requested: TokenAmount,
    ) -> Self {
        LedgerError::InsufficientBalance {
            account: account.clone(),
            balance,
            requested,
        }
    }

    /// Create an Overflow error
    pub fn overflow(operation: &str, account: &Address) -> Self {
        LedgerError::Overflow {
            operation: operation.to_string(),
            account: account.clone(),
        }
    }

    /// Create a TradeAmountExceeded error
    pub fn trade_amount_exceeded(
        from: &Address,
        amount: TokenAmount,
        max_amount: TokenAmount,
    ) -> Self {
        LedgerError::TradeAmountExceeded {
            from: from.clone(),
            amount,
            max_amount,
        }
    }

    /// Create a TradeLimitExceeded error
    pub fn trade_limit_exceeded(from: &Address, limit: u32) -> Self {
        LedgerError::TradeLimitExceeded {
            from: from.clone(),
            limit,
        }
    }

    /// Create an Unauthorized error
    pub fn unauthorized(caller: &Address, operation: &str) -> Self {
        LedgerError::Unauthorized {
            caller: caller.clone(),
            operation: operation.to_string(),
        }
    }

    /// Create a Router error
    pub fn router(operation: &str, message: impl Into<String>) -> Self {
        LedgerError::Router {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
