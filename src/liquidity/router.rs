//! Automated market maker boundary

use crate::types::{Address, LedgerError, TokenAmount};

/// An external market that can swap tokens and accept liquidity
///
/// The router owns an account on the ledger. Tokens are moved into that
/// account by an ordinary transfer before either call is made; the router
/// then draws on them.
pub trait AmmRouter {
    /// Ledger account the router draws tokens from
    fn address(&self) -> &Address;

    /// Swap `token_amount` tokens for the paired asset
    ///
    /// Returns the amount of paired asset received.
    fn swap_tokens_for_pair(&mut self, token_amount: TokenAmount) -> Result<u128, LedgerError>;

    /// Supply `token_amount` tokens and `pair_amount` of the paired asset
    ///
    /// Returns the amount of liquidity issued.
    fn add_liquidity(
        &mut self,
        token_amount: TokenAmount,
        pair_amount: u128,
    ) -> Result<u128, LedgerError>;
}
