//! Swap-and-liquify process
//!
//! `LiquidityManager` drains the liquidity manager account into an
//! [`AmmRouter`]: half of the collected tokens are swapped for the paired
//! asset and the other half is supplied together with the swap output.
//!
//! The process is triggered explicitly and never from inside a transfer.
//! The token movement is a regular ledger transfer from the manager account
//! to the router account; router calls happen after it has committed, so a
//! router failure leaves the tokens with the router.

use crate::core::TokenEngine;
use crate::liquidity::AmmRouter;
use crate::types::{Address, LedgerError, Timestamp, TokenAmount};

/// Outcome of one swap-and-liquify run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityReport {
    /// Tokens that arrived in the router account
    pub collected: TokenAmount,
    /// Tokens swapped for the paired asset
    pub swapped: TokenAmount,
    /// Paired asset received from the swap
    pub pair_received: u128,
    /// Tokens supplied as liquidity
    pub token_added: TokenAmount,
    /// Liquidity issued by the router
    pub liquidity_issued: u128,
}

/// Converts accumulated tax into liquidity
#[derive(Debug)]
pub struct LiquidityManager<R: AmmRouter> {
    router: R,
    token: Address,
    paired_asset: Address,

    /// Balance below which `swap_and_liquify` does nothing
    swap_threshold: TokenAmount,
}

impl<R: AmmRouter> LiquidityManager<R> {
    /// Create a manager for `token` paired with `paired_asset`
    ///
    /// The swap threshold starts at one base unit, so any non-zero balance
    /// is processed.
    pub fn new(router: R, token: Address, paired_asset: Address) -> Self {
        Self {
            router,
            token,
            paired_asset,
            swap_threshold: 1,
        }
    }

    pub fn with_swap_threshold(mut self, swap_threshold: TokenAmount) -> Self {
        self.swap_threshold = swap_threshold.max(1);
        self
    }

    pub fn token(&self) -> &Address {
        &self.token
    }

    pub fn paired_asset(&self) -> &Address {
        &self.paired_asset
    }

    pub fn swap_threshold(&self) -> TokenAmount {
        self.swap_threshold
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Move the manager's balance into the market
    ///
    /// Returns `Ok(None)` when the balance is below the swap threshold.
    ///
    /// # Errors
    ///
    /// Any error of the ledger transfer (nothing has moved) or of a router
    /// call (the tokens stay in the router account).
    pub fn swap_and_liquify(
        &mut self,
        engine: &mut TokenEngine,
        now: Timestamp,
    ) -> Result<Option<LiquidityReport>, LedgerError> {
        let manager = engine.liquidity_manager().clone();
        let balance = engine.balance_of(&manager);
        if balance < self.swap_threshold {
            return Ok(None);
        }

        let receipt = engine.transfer(&manager, self.router.address(), balance, now)?;
        let collected = receipt.credited;
        let swapped = collected / 2;
        let token_added = collected - swapped;

        let pair_received = self.router.swap_tokens_for_pair(swapped)?;
        let liquidity_issued = self.router.add_liquidity(token_added, pair_received)?;

        tracing::info!(
            token = %self.token,
            paired_asset = %self.paired_asset,
            collected,
            pair_received,
            liquidity_issued,
            "swap and liquify completed"
        );

        Ok(Some(LiquidityReport {
            collected,
            swapped,
            pair_received,
            token_added,
            liquidity_issued,
        }))
    }
}
