//! Thread-safe account book for concurrent processing
//!
//! This module provides the `SharedAccountBook` struct, which holds account
//! states in a `DashMap` so that transfers touching different accounts can
//! proceed in parallel.
//!
//! # Design
//!
//! Every balance change is a single entry update performed while holding
//! that entry's shard lock, so each individual debit or credit is atomic.
//! Atomicity of a whole transfer (several entries) is provided one level up
//! by `SharedTokenEngine`, which serializes transfers per account.
//!
//! # Thread Safety
//!
//! All operations take `&self`. The [`Ledger`] trait is implemented for
//! `&SharedAccountBook`, so the sequential transfer orchestration runs over
//! a shared reference unchanged.

use crate::core::traits::Ledger;
use crate::types::{Account, Address, LedgerError, TokenAmount, TradeWindow};
use dashmap::DashMap;

/// Thread-safe account book
#[derive(Debug)]
pub struct SharedAccountBook {
    /// Concurrent map of account states
    ///
    /// DashMap provides fine-grained locking through internal sharding,
    /// allowing concurrent access to different accounts without global locks.
    accounts: DashMap<Address, Account>,

    /// Fixed at construction
    total_supply: TokenAmount,
}

impl SharedAccountBook {
    /// Create a book holding the whole supply in `owner`'s account
    pub fn genesis(owner: &Address, total_supply: TokenAmount) -> Self {
        let accounts = DashMap::new();
        let mut owner_account = Account::new(owner.clone());
        owner_account.balance = total_supply;
        accounts.insert(owner.clone(), owner_account);

        Self {
            accounts,
            total_supply,
        }
    }
}

impl Ledger for &SharedAccountBook {
    fn account(&self, address: &Address) -> Account {
        self.accounts
            .get(address)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| Account::new(address.clone()))
    }

    fn balance_of(&self, address: &Address) -> TokenAmount {
        self.accounts
            .get(address)
            .map_or(0, |entry| entry.value().balance)
    }

    fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    fn debit(&mut self, address: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }

        let mut entry = self
            .accounts
            .get_mut(address)
            .ok_or_else(|| LedgerError::insufficient_balance(address, 0, amount))?;

        let account = entry.value_mut();
        let balance = account.balance;
        account.balance = balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::insufficient_balance(address, balance, amount))?;

        Ok(())
    }

    fn credit(&mut self, address: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        let mut entry = self
            .accounts
            .entry(address.clone())
            .or_insert_with(|| Account::new(address.clone()));

        let account = entry.value_mut();
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::overflow("credit", address))?;

        Ok(())
    }

    fn set_fee_exempt(&mut self, address: &Address, exempt: bool) {
        if !exempt && !self.accounts.contains_key(address) {
            return;
        }
        self.accounts
            .entry(address.clone())
            .or_insert_with(|| Account::new(address.clone()))
            .value_mut()
            .fee_exempt = exempt;
    }

    fn set_trade_window(&mut self, address: &Address, window: TradeWindow) {
        self.accounts
            .entry(address.clone())
            .or_insert_with(|| Account::new(address.clone()))
            .value_mut()
            .trade_window = Some(window);
    }

    fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.address.cmp(&b.address));
        accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn addr(name: &str) -> Address {
        Address::from(name)
    }

    #[test]
    fn test_genesis_and_reads() {
        let book = SharedAccountBook::genesis(&addr("owner"), 500);
        let view = &book;

        assert_eq!(view.balance_of(&addr("owner")), 500);
        assert_eq!(view.total_supply(), 500);
        assert_eq!(view.account(&addr("nobody")), Account::new(addr("nobody")));
        assert_eq!(view.accounts().len(), 1);
    }

    #[test]
    fn test_debit_and_credit() {
        let book = SharedAccountBook::genesis(&addr("owner"), 500);
        let mut view = &book;

        view.debit(&addr("owner"), 200).unwrap();
        view.credit(&addr("alice"), 200).unwrap();

        assert_eq!(view.balance_of(&addr("owner")), 300);
        assert_eq!(view.balance_of(&addr("alice")), 200);
        assert!(matches!(
            view.debit(&addr("alice"), 201),
            Err(LedgerError::InsufficientBalance { balance: 200, .. })
        ));
        assert!(matches!(
            view.debit(&addr("ghost"), 1),
            Err(LedgerError::InsufficientBalance { balance: 0, .. })
        ));
        assert_eq!(view.accounts().len(), 2);
    }

    #[test]
    fn test_concurrent_credits_are_not_lost() {
        let book = Arc::new(SharedAccountBook::genesis(&addr("owner"), 0));
        let mut handles = vec![];

        for _ in 0..8 {
            let book = Arc::clone(&book);
            handles.push(thread::spawn(move || {
                let mut view = &*book;
                for _ in 0..1_000 {
                    view.credit(&addr("lm"), 1).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!((&*book).balance_of(&addr("lm")), 8_000);
    }
}
