//! Account book module
//!
//! This module provides the `AccountBook` struct which owns every account
//! balance and the total supply for sequential processing.
//!
//! The AccountBook is responsible for:
//! - Minting the whole supply to the owner at construction
//! - Creating accounts implicitly on first credit or flag change
//! - Overflow/underflow-safe debit and credit
//! - Providing sorted account listings for output

use crate::core::traits::Ledger;
use crate::types::{Account, Address, LedgerError, TokenAmount, TradeWindow};
use std::collections::HashMap;

/// Sequential ledger of all accounts
///
/// No policy lives here: tax, exemptions and limits are applied by the
/// transfer orchestrator before any balance is touched.
#[derive(Debug, Clone)]
pub struct AccountBook {
    /// Map of addresses to account states
    accounts: HashMap<Address, Account>,

    /// Fixed at construction
    total_supply: TokenAmount,
}

impl AccountBook {
    /// Create a book holding the whole supply in `owner`'s account
    pub fn genesis(owner: &Address, total_supply: TokenAmount) -> Self {
        let mut owner_account = Account::new(owner.clone());
        owner_account.balance = total_supply;

        let mut accounts = HashMap::new();
        accounts.insert(owner.clone(), owner_account);

        AccountBook {
            accounts,
            total_supply,
        }
    }

    /// Get or create an account for the specified address
    fn get_or_create_account(&mut self, address: &Address) -> &mut Account {
        self.accounts
            .entry(address.clone())
            .or_insert_with(|| Account::new(address.clone()))
    }
}

impl Ledger for AccountBook {
    fn account(&self, address: &Address) -> Account {
        self.accounts
            .get(address)
            .cloned()
            .unwrap_or_else(|| Account::new(address.clone()))
    }

    fn balance_of(&self, address: &Address) -> TokenAmount {
        self.accounts.get(address).map_or(0, |acc| acc.balance)
    }

    fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    fn debit(&mut self, address: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }

        // An unseen account has nothing to debit; don't materialize it
        let account = self
            .accounts
            .get_mut(address)
            .ok_or_else(|| LedgerError::insufficient_balance(address, 0, amount))?;

        let balance = account.balance;
        account.balance = balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::insufficient_balance(address, balance, amount))?;

        Ok(())
    }

    fn credit(&mut self, address: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        let account = self.get_or_create_account(address);

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
        self.get_or_create_account(address).fee_exempt = exempt;
    }

    fn set_trade_window(&mut self, address: &Address, window: TradeWindow) {
        self.get_or_create_account(address).trade_window = Some(window);
    }

    fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.address.cmp(&b.address));
        accounts
    }
}
