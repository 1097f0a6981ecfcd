//! Token engine
//!
//! This module provides the TokenEngine, the sequential facade over the
//! ledger, the configuration record and the administration surface. Each
//! call runs to completion before the next begins, which is all the
//! isolation the transfer contract needs in a single-threaded host.
//!
//! The engine enforces:
//! - Trade limits and tax on every transfer via the orchestrator
//! - Owner checks on every configuration mutation
//! - Validation of genesis parameters before anything is minted

use crate::core::admin;
use crate::core::ledger::AccountBook;
use crate::core::traits::Ledger;
use crate::core::transfer::{execute_transfer, TransferReceipt};
use crate::types::{
    Account, Address, FeeMode, LedgerError, OperationRecord, OperationType, Timestamp,
    TokenAmount, TokenConfig, TokenGenesis, TradeWindow,
};

/// Sequential token engine
///
/// Owns the account book and the configuration record. All mutation goes
/// through [`TokenEngine::transfer`], [`TokenEngine::process`] or the
/// administration methods; raw balances are never exposed mutably.
#[derive(Debug, Clone)]
pub struct TokenEngine {
    config: TokenConfig,
    ledger: AccountBook,
}

impl TokenEngine {
    /// Create a token from its genesis parameters
    ///
    /// Mints the whole supply to the owner and marks the liquidity manager
    /// and every listed account fee-exempt.
    ///
    /// # Errors
    ///
    /// `InvalidRate` or `InvalidLimit` if the genesis settings would be
    /// rejected by the corresponding administration call.
    pub fn new(genesis: &TokenGenesis) -> Result<Self, LedgerError> {
        admin::validate_tax_rate(genesis.tax_rate_bps)?;
        admin::validate_trade_limit(
            genesis.daily_max_trade_amount,
            genesis.daily_trade_limit_count,
        )?;

        let config = genesis.to_config();
        let mut ledger = AccountBook::genesis(&config.owner, config.total_supply);
        ledger.set_fee_exempt(&config.liquidity_manager, true);
        for account in &genesis.fee_exempt {
            ledger.set_fee_exempt(account, true);
        }

        Ok(TokenEngine { config, ledger })
    }

    /// Replay a single operation record
    ///
    /// Routes the record to the transfer orchestrator or the
    /// administration surface based on its type.
    pub fn process(&mut self, record: &OperationRecord) -> Result<(), LedgerError> {
        match &record.kind {
            OperationType::Transfer { to, amount } => {
                self.transfer(&record.caller, to, *amount, record.time)?;
            }
            operation => {
                admin::apply(&mut self.config, &mut self.ledger, &record.caller, operation)?;
                tracing::debug!(
                    operation = operation.name(),
                    caller = %record.caller,
                    version = self.config.version,
                    "configuration updated"
                );
            }
        }
        Ok(())
    }

    /// Move `amount` from `from` to `to` at time `now`
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<TransferReceipt, LedgerError> {
        let receipt = execute_transfer(&mut self.ledger, &self.config, from, to, amount, now)?;
        tracing::debug!(
            from = %receipt.from,
            to = %receipt.to,
            amount = receipt.amount,
            tax = receipt.tax,
            "transfer committed"
        );
        Ok(receipt)
    }

    /// Replace the liquidity manager (owner only)
    pub fn set_liquidity_manager(
        &mut self,
        caller: &Address,
        manager: &Address,
    ) -> Result<(), LedgerError> {
        admin::set_liquidity_manager(&mut self.config, &mut self.ledger, caller, manager)
    }

    /// Replace both trade limits (owner only)
    pub fn set_trade_limit(
        &mut self,
        caller: &Address,
        max_amount: TokenAmount,
        max_count: u32,
    ) -> Result<(), LedgerError> {
        admin::set_trade_limit(&mut self.config, caller, max_amount, max_count)
    }

    /// Replace the tax rate (owner only)
    pub fn set_tax_rate(&mut self, caller: &Address, bps: u32) -> Result<(), LedgerError> {
        admin::set_tax_rate(&mut self.config, caller, bps)
    }

    /// Mark an account fee-exempt (owner only)
    pub fn exclude_from_fee(
        &mut self,
        caller: &Address,
        account: &Address,
    ) -> Result<(), LedgerError> {
        admin::set_fee_exempt(&mut self.config, &mut self.ledger, caller, account, true)
    }

    /// Clear an account's fee exemption (owner only)
    pub fn include_in_fee(&mut self, caller: &Address, account: &Address) -> Result<(), LedgerError> {
        admin::set_fee_exempt(&mut self.config, &mut self.ledger, caller, account, false)
    }

    /// Hand the owner role to another identity (owner only)
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: &Address,
    ) -> Result<(), LedgerError> {
        admin::transfer_ownership(&mut self.config, caller, new_owner)
    }

    /// Balance of an account; zero for accounts never seen
    pub fn balance_of(&self, account: &Address) -> TokenAmount {
        self.ledger.balance_of(account)
    }

    /// Fixed supply minted to the owner at genesis
    pub fn total_supply(&self) -> TokenAmount {
        self.ledger.total_supply()
    }

    /// Account allowed to call the administration operations
    pub fn owner(&self) -> &Address {
        &self.config.owner
    }

    /// Account currently receiving routed tax
    pub fn liquidity_manager(&self) -> &Address {
        &self.config.liquidity_manager
    }

    /// Tax rate in basis points
    pub fn tax_rate(&self) -> u32 {
        self.config.tax_rate_bps
    }

    /// How the tax is charged
    pub fn fee_mode(&self) -> FeeMode {
        self.config.fee_mode
    }

    /// Whether transfers to or from `account` skip tax and trade limits
    pub fn is_excluded_from_fee(&self, account: &Address) -> bool {
        self.ledger.account(account).fee_exempt
    }

    /// Largest principal a non-exempt transfer may move
    pub fn get_daily_max_trade_amount(&self) -> TokenAmount {
        self.config.daily_max_trade_amount
    }

    /// Transfers a non-exempt sender may make per rolling window
    pub fn get_daily_trade_limit(&self) -> u32 {
        self.config.daily_trade_limit_count
    }

    /// Stored trade window of an account (may already be expired)
    pub fn trade_window(&self, account: &Address) -> Option<TradeWindow> {
        self.ledger.account(account).trade_window
    }

    /// Snapshot of the configuration record
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Final account states, sorted by address
    pub fn get_accounts(&self) -> Vec<Account> {
        self.ledger.accounts()
    }
}
