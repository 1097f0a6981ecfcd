//! Fee & exemption policy
//!
//! Decides how much tax a transfer owes and how the principal splits between
//! sender debit, receiver credit and the liquidity manager.
//!
//! Exemption is checked on either party so that fee routing into or out of
//! the liquidity manager is never taxed once that account is exempt.
//! Rounding is floor division on the tax itself: the receiver gets
//! `amount - floor(amount * bps / 10000)`, so any remainder stays with the
//! receiver and the liquidity manager's share is never rounded up.

use crate::types::{Account, FeeMode, LedgerError, TokenAmount, TokenConfig, MAX_TAX_RATE_BPS};

/// Balance movements of a single transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxQuote {
    /// Tax routed to the liquidity manager
    pub tax: TokenAmount,
    /// Amount removed from the sender
    pub debit: TokenAmount,
    /// Amount delivered to the receiver
    pub credit: TokenAmount,
}

/// `floor(amount * bps / 10000)` without intermediate overflow
///
/// Splits `amount` as `q * 10000 + r` so that only `r * bps` (< 10^8) is
/// ever multiplied.
pub fn tax_on(amount: TokenAmount, bps: u32) -> TokenAmount {
    let denominator = TokenAmount::from(MAX_TAX_RATE_BPS);
    let bps = TokenAmount::from(bps);
    let whole = amount / denominator;
    let rest = amount % denominator;
    whole * bps + rest * bps / denominator
}

/// Tax owed by a transfer from `sender` to `receiver`
///
/// Zero if either party is fee-exempt.
pub fn compute_tax(
    sender: &Account,
    receiver: &Account,
    amount: TokenAmount,
    config: &TokenConfig,
) -> TokenAmount {
    if sender.fee_exempt || receiver.fee_exempt {
        return 0;
    }
    tax_on(amount, config.tax_rate_bps)
}

/// Full balance split of a transfer under the configured fee mode
///
/// # Errors
///
/// `Overflow` if a surcharge pushes the sender's debit past `u128::MAX`.
pub fn quote(
    sender: &Account,
    receiver: &Account,
    amount: TokenAmount,
    config: &TokenConfig,
) -> Result<TaxQuote, LedgerError> {
    let tax = compute_tax(sender, receiver, amount, config);

    match config.fee_mode {
        FeeMode::Deducted => Ok(TaxQuote {
            tax,
            debit: amount,
            credit: amount - tax,
        }),
        FeeMode::Surcharge => {
            let debit = amount
                .checked_add(tax)
                .ok_or_else(|| LedgerError::overflow("surcharge", &sender.address))?;
            Ok(TaxQuote {
                tax,
                debit,
                credit: amount,
            })
        }
    }
}
