//! Selection and input models for the exchange workflow.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::BalanceChange;
use crate::errors::ValidationError;

/// Which end of an exchange a selection or input belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSide {
    From,
    To,
}

impl fmt::Display for SelectionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionSide::From => write!(f, "from"),
            SelectionSide::To => write!(f, "to"),
        }
    }
}

/// A user-entered transfer amount.
///
/// Serialized as `null` when empty. Zero is treated as empty, matching how the
/// input field clears itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Decimal>", into = "Option<Decimal>")]
pub enum AmountInput {
    #[default]
    Empty,
    Value(Decimal),
}

impl AmountInput {
    /// Parses raw field text. Blank text is `Empty`; anything non-numeric is rejected.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(AmountInput::Empty);
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(AmountInput::from)
            .map_err(|_| {
                ValidationError::InvalidInput(format!("'{}' is not a valid amount", trimmed))
            })
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            AmountInput::Empty => None,
            AmountInput::Value(value) => Some(*value),
        }
    }

    /// The amount to apply during an exchange. Empty counts as zero.
    pub fn amount(&self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AmountInput::Empty)
    }
}

impl From<Option<Decimal>> for AmountInput {
    fn from(value: Option<Decimal>) -> Self {
        match value {
            Some(value) if !value.is_zero() => AmountInput::Value(value),
            _ => AmountInput::Empty,
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::from(Some(value))
    }
}

impl From<AmountInput> for Option<Decimal> {
    fn from(input: AmountInput) -> Self {
        input.value()
    }
}

/// A request to change the selected accounts. Sides left `None` are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSelection {
    pub from_id: Option<String>,
    pub to_id: Option<String>,
}

impl AccountSelection {
    pub fn both(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Self {
            from_id: Some(from_id.into()),
            to_id: Some(to_id.into()),
        }
    }

    pub fn with_from(from_id: impl Into<String>) -> Self {
        Self {
            from_id: Some(from_id.into()),
            to_id: None,
        }
    }

    pub fn with_to(to_id: impl Into<String>) -> Self {
        Self {
            from_id: None,
            to_id: Some(to_id.into()),
        }
    }
}

/// The currently selected accounts, held by id and resolved against the
/// registry each time they are used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAccounts {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SelectedAccounts {
    pub fn get(&self, side: SelectionSide) -> Option<&str> {
        match side {
            SelectionSide::From => self.from.as_deref(),
            SelectionSide::To => self.to.as_deref(),
        }
    }
}

/// Balance changes applied by a completed exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeReceipt {
    pub debit: BalanceChange,
    pub credit: BalanceChange,
}
