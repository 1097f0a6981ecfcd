//! Concurrent token engine
//!
//! This module provides the `SharedTokenEngine` struct, which implements the
//! transfer and administration contract on a host where calls genuinely run
//! in parallel.
//!
//! # Design
//!
//! ```text
//! SharedTokenEngine
//!     ├── RwLock<TokenConfig>                    (read: transfers, write: admin)
//!     ├── SharedAccountBook                      (DashMap of account states)
//!     └── DashMap<Address, Arc<Mutex<()>>>       (per-account transfer locks)
//! ```
//!
//! A transfer holds the configuration read lock for its whole duration, so
//! it observes exactly one configuration version and administration calls
//! wait for in-flight transfers to finish. The sender and receiver mutexes
//! are taken in address order, which rules out lock-order deadlocks between
//! two transfers over the same pair. The liquidity manager is not locked:
//! tax credits only ever add to its balance.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use dashmap::DashMap;

use super::SharedAccountBook;
use crate::core::admin;
use crate::core::traits::Ledger;
use crate::core::transfer::{execute_transfer, TransferReceipt};
use crate::types::{
    Account, Address, LedgerError, OperationRecord, OperationType, Timestamp, TokenAmount,
    TokenConfig, TokenGenesis,
};

/// Thread-safe token engine
///
/// Share it across tasks behind an `Arc`; every method takes `&self`.
#[derive(Debug)]
pub struct SharedTokenEngine {
    config: RwLock<TokenConfig>,
    book: SharedAccountBook,
    locks: DashMap<Address, Arc<Mutex<()>>>,
}

impl SharedTokenEngine {
    /// Create a token from its genesis parameters
    ///
    /// Performs the same validation and initial exemptions as
    /// [`crate::core::TokenEngine::new`].
    pub fn new(genesis: &TokenGenesis) -> Result<Self, LedgerError> {
        admin::validate_tax_rate(genesis.tax_rate_bps)?;
        admin::validate_trade_limit(
            genesis.daily_max_trade_amount,
            genesis.daily_trade_limit_count,
        )?;

        let config = genesis.to_config();
        let book = SharedAccountBook::genesis(&config.owner, config.total_supply);
        {
            let mut view = &book;
            view.set_fee_exempt(&config.liquidity_manager, true);
            for account in &genesis.fee_exempt {
                view.set_fee_exempt(account, true);
            }
        }

        Ok(Self {
            config: RwLock::new(config),
            book,
            locks: DashMap::new(),
        })
    }

    /// Replay a single operation record
    pub fn process(&self, record: &OperationRecord) -> Result<(), LedgerError> {
        match &record.kind {
            OperationType::Transfer { to, amount } => {
                self.transfer(&record.caller, to, *amount, record.time)?;
            }
            operation => {
                let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
                let mut view = &self.book;
                admin::apply(&mut config, &mut view, &record.caller, operation)?;
                tracing::debug!(
                    operation = operation.name(),
                    caller = %record.caller,
                    version = config.version,
                    "configuration updated"
                );
            }
        }
        Ok(())
    }

    /// Move `amount` from `from` to `to` at time `now`
    pub fn transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<TransferReceipt, LedgerError> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);

        let mut parties = vec![from, to];
        parties.sort();
        parties.dedup();

        // Clone the handles out of the map first so no shard lock is held
        // while waiting on an account mutex.
        let handles: Vec<Arc<Mutex<()>>> = parties
            .into_iter()
            .map(|party| {
                self.locks
                    .entry(party.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(())))
                    .value()
                    .clone()
            })
            .collect();
        let _guards: Vec<_> = handles
            .iter()
            .map(|handle| handle.lock().unwrap_or_else(PoisonError::into_inner))
            .collect();

        let mut view = &self.book;
        let receipt = execute_transfer(&mut view, &config, from, to, amount, now)?;
        tracing::debug!(
            from = %receipt.from,
            to = %receipt.to,
            amount = receipt.amount,
            tax = receipt.tax,
            "transfer committed"
        );
        Ok(receipt)
    }

    /// Balance of an account; zero for accounts never seen
    pub fn balance_of(&self, account: &Address) -> TokenAmount {
        (&self.book).balance_of(account)
    }

    /// Fixed supply minted to the owner at genesis
    pub fn total_supply(&self) -> TokenAmount {
        (&self.book).total_supply()
    }

    /// Whether transfers to or from `account` skip tax and trade limits
    pub fn is_excluded_from_fee(&self, account: &Address) -> bool {
        (&self.book).account(account).fee_exempt
    }

    /// The current liquidity manager
    pub fn liquidity_manager(&self) -> Address {
        self.config_snapshot().liquidity_manager
    }

    /// Copy of the current configuration record
    pub fn config_snapshot(&self) -> TokenConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of all accounts, sorted by address
    ///
    /// Consistent only once in-flight transfers have finished; the async
    /// strategy calls it after every batch has been joined.
    pub fn get_accounts(&self) -> Vec<Account> {
        (&self.book).accounts()
    }
}
