//! Operation-related types for the token engine
//!
//! This module defines the operations that can be replayed against the
//! engine: the caller-facing transfer plus the owner-gated administration
//! calls.

use super::address::Address;
use super::amount::{Timestamp, TokenAmount};

/// A single operation with its caller and the time it executes at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    /// Identity invoking the operation (the implicit `from` of a transfer)
    pub caller: Address,

    /// Injected current time for this operation
    pub time: Timestamp,

    /// What to do
    pub kind: OperationType,
}

/// Operations supported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationType {
    /// Move `amount` from the caller to `to`, subject to tax and limits
    Transfer { to: Address, amount: TokenAmount },

    /// Replace the liquidity manager
    SetLiquidityManager { manager: Address },

    /// Replace both trade limits atomically
    SetTradeLimit {
        max_amount: TokenAmount,
        max_count: u32,
    },

    /// Replace the tax rate
    SetTaxRate { bps: u32 },

    /// Mark an account fee-exempt
    ExcludeFromFee { account: Address },

    /// Clear an account's fee exemption
    IncludeInFee { account: Address },

    /// Hand the administrator role to another identity
    TransferOwnership { new_owner: Address },
}

impl OperationType {
    /// Operation name as written in journals and logs
    pub fn name(&self) -> &'static str {
        match self {
            OperationType::Transfer { .. } => "transfer",
            OperationType::SetLiquidityManager { .. } => "set_liquidity_manager",
            OperationType::SetTradeLimit { .. } => "set_trade_limit",
            OperationType::SetTaxRate { .. } => "set_tax_rate",
            OperationType::ExcludeFromFee { .. } => "exclude_from_fee",
            OperationType::IncludeInFee { .. } => "include_in_fee",
            OperationType::TransferOwnership { .. } => "transfer_ownership",
        }
    }

    /// Whether this operation belongs to the administration surface
    pub fn is_admin(&self) -> bool {
        !matches!(self, OperationType::Transfer { .. })
    }
}

impl OperationRecord {
    /// Convenience constructor for a transfer
    pub fn transfer(from: Address, to: Address, amount: TokenAmount, time: Timestamp) -> Self {
        OperationRecord {
            caller: from,
            time,
            kind: OperationType::Transfer { to, amount },
        }
    }
}
