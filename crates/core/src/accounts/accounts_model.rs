//! Account domain models.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_ACCOUNT_BALANCE, DEFAULT_CURRENCY};
use crate::fx::round_amount;

/// A single currency balance.
///
/// The balance is private so every write goes through rounding, including
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AccountRecord")]
pub struct Account {
    id: String,
    currency: String,
    balance: Decimal,
}

/// Wire form of an [`Account`] as stored or received.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    id: String,
    currency: Option<String>,
    balance: Decimal,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            currency: normalize_currency(record.currency),
            balance: round_amount(record.balance),
        }
    }
}

fn normalize_currency(currency: Option<String>) -> String {
    currency
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

impl Account {
    /// Creates an account with a freshly generated id.
    pub fn new(new_account: NewAccount) -> Self {
        let balance = new_account.balance.unwrap_or(DEFAULT_ACCOUNT_BALANCE);

        Self {
            id: Uuid::new_v4().to_string(),
            currency: normalize_currency(new_account.currency),
            balance: round_amount(balance),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Sets the balance to `balance` rounded to 2 decimals and returns the previous value.
    ///
    /// Negative balances are accepted.
    pub fn update_balance(&mut self, balance: Decimal) -> Decimal {
        std::mem::replace(&mut self.balance, round_amount(balance))
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub currency: Option<String>,
    pub balance: Option<Decimal>,
}

impl NewAccount {
    pub fn new(currency: impl Into<String>, balance: Decimal) -> Self {
        Self {
            currency: Some(currency.into()),
            balance: Some(balance),
        }
    }

    /// Builds an account input from a textual balance.
    ///
    /// Blank or non-numeric text falls back to the default balance.
    pub fn from_raw(currency: impl Into<String>, raw_balance: &str) -> Self {
        let balance = Decimal::from_str(raw_balance.trim())
            .or_else(|_| Decimal::from_scientific(raw_balance.trim()))
            .ok();
        Self {
            currency: Some(currency.into()),
            balance,
        }
    }
}

/// Old and new balance of an account after an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub account_id: String,
    pub currency: String,
    pub old_balance: Decimal,
    pub new_balance: Decimal,
}
