//! The ordered, session-owned collection of accounts.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts_model::{Account, BalanceChange, NewAccount};
use pocketfx_rates::RateSnapshot;

/// What seeding does with accounts that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeedMode {
    /// Drop existing accounts, then create one per snapshot currency
    #[default]
    Replace,
    /// Keep existing accounts and append one per snapshot currency.
    /// Seeding twice yields two accounts per currency.
    Append,
}

#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one account per currency in `snapshot`, in snapshot order.
    ///
    /// Returns the ids of the accounts created.
    pub fn seed(
        &mut self,
        snapshot: &RateSnapshot,
        default_balance: Decimal,
        mode: SeedMode,
    ) -> Vec<String> {
        if mode == SeedMode::Replace {
            self.accounts.clear();
        }

        let created: Vec<Account> = snapshot
            .rates
            .codes()
            .map(|currency| Account::new(NewAccount::new(currency, default_balance)))
            .collect();
        let ids = created.iter().map(|a| a.id().to_string()).collect();

        debug!(
            "Seeded {} accounts from {} snapshot ({:?}), registry now holds {}",
            created.len(),
            snapshot.base,
            mode,
            self.accounts.len() + created.len()
        );
        self.accounts.extend(created);
        ids
    }

    /// Appends a single account and returns its id.
    pub fn insert(&mut self, new_account: NewAccount) -> String {
        let account = Account::new(new_account);
        let id = account.id().to_string();
        self.accounts.push(account);
        id
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id() == id)
    }

    fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Copy of the accounts in registry order.
    pub fn as_list(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Updates the balance of account `id`. Returns `None` if no such account exists.
    pub fn update_balance(&mut self, id: &str, balance: Decimal) -> Option<BalanceChange> {
        let account = self.find_by_id_mut(id)?;
        let old_balance = account.update_balance(balance);
        Some(BalanceChange {
            account_id: account.id().to_string(),
            currency: account.currency().to_string(),
            old_balance,
            new_balance: account.balance(),
        })
    }
}
