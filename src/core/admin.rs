//! Administration surface
//!
//! Owner-gated configuration mutators. Every mutator checks the caller
//! first, validates its input second, and only then touches state, so a
//! rejected call changes nothing. A successful call bumps the configuration
//! version.

use crate::core::traits::Ledger;
use crate::types::{Address, LedgerError, OperationType, TokenAmount, TokenConfig, MAX_TAX_RATE_BPS};

/// Fail with `Unauthorized` unless `caller` is the configured owner
pub fn ensure_owner(
    config: &TokenConfig,
    caller: &Address,
    operation: &str,
) -> Result<(), LedgerError> {
    if *caller != config.owner {
        return Err(LedgerError::unauthorized(caller, operation));
    }
    Ok(())
}

/// Validate a tax rate in basis points
pub fn validate_tax_rate(bps: u32) -> Result<(), LedgerError> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(LedgerError::InvalidRate {
            bps,
            max: MAX_TAX_RATE_BPS,
        });
    }
    Ok(())
}

/// Validate a pair of trade limits; both must be positive
pub fn validate_trade_limit(max_amount: TokenAmount, max_count: u32) -> Result<(), LedgerError> {
    if max_amount == 0 || max_count == 0 {
        return Err(LedgerError::InvalidLimit {
            max_amount,
            max_count,
        });
    }
    Ok(())
}

/// Replace the liquidity manager and mark it fee-exempt
///
/// Balances already routed to the previous manager stay where they are.
pub fn set_liquidity_manager<L: Ledger + ?Sized>(
    config: &mut TokenConfig,
    ledger: &mut L,
    caller: &Address,
    manager: &Address,
) -> Result<(), LedgerError> {
    ensure_owner(config, caller, "set_liquidity_manager")?;
    config.liquidity_manager = manager.clone();
    ledger.set_fee_exempt(manager, true);
    config.version += 1;
    Ok(())
}

/// Replace both trade limits together
///
/// Open trade windows are left as they are.
pub fn set_trade_limit(
    config: &mut TokenConfig,
    caller: &Address,
    max_amount: TokenAmount,
    max_count: u32,
) -> Result<(), LedgerError> {
    ensure_owner(config, caller, "set_trade_limit")?;
    validate_trade_limit(max_amount, max_count)?;
    config.daily_max_trade_amount = max_amount;
    config.daily_trade_limit_count = max_count;
    config.version += 1;
    Ok(())
}

/// Replace the tax rate
pub fn set_tax_rate(config: &mut TokenConfig, caller: &Address, bps: u32) -> Result<(), LedgerError> {
    ensure_owner(config, caller, "set_tax_rate")?;
    validate_tax_rate(bps)?;
    config.tax_rate_bps = bps;
    config.version += 1;
    Ok(())
}

/// Set or clear an account's fee exemption
pub fn set_fee_exempt<L: Ledger + ?Sized>(
    config: &mut TokenConfig,
    ledger: &mut L,
    caller: &Address,
    account: &Address,
    exempt: bool,
) -> Result<(), LedgerError> {
    let operation = if exempt {
        "exclude_from_fee"
    } else {
        "include_in_fee"
    };
    ensure_owner(config, caller, operation)?;
    ledger.set_fee_exempt(account, exempt);
    config.version += 1;
    Ok(())
}

/// Hand the owner role to `new_owner`
pub fn transfer_ownership(
    config: &mut TokenConfig,
    caller: &Address,
    new_owner: &Address,
) -> Result<(), LedgerError> {
    ensure_owner(config, caller, "transfer_ownership")?;
    config.owner = new_owner.clone();
    config.version += 1;
    Ok(())
}

/// Dispatch an administration operation
///
/// Transfers are not administration operations and are passed back
/// untouched as `Ok(false)`; every other operation returns `Ok(true)` once
/// applied.
pub fn apply<L: Ledger + ?Sized>(
    config: &mut TokenConfig,
    ledger: &mut L,
    caller: &Address,
    operation: &OperationType,
) -> Result<bool, LedgerError> {
    match operation {
        OperationType::Transfer { .. } => return Ok(false),
        OperationType::SetLiquidityManager { manager } => {
            set_liquidity_manager(config, ledger, caller, manager)?
        }
        OperationType::SetTradeLimit {
            max_amount,
            max_count,
        } => set_trade_limit(config, caller, *max_amount, *max_count)?,
        OperationType::SetTaxRate { bps } => set_tax_rate(config, caller, *bps)?,
        OperationType::ExcludeFromFee { account } => {
            set_fee_exempt(config, ledger, caller, account, true)?
        }
        OperationType::IncludeInFee { account } => {
            set_fee_exempt(config, ledger, caller, account, false)?
        }
        OperationType::TransferOwnership { new_owner } => {
            transfer_ownership(config, caller, new_owner)?
        }
    }
    Ok(true)
}
