use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;

/// Source and target currency of a conversion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    pub from: String,
    pub to: String,
}

impl ConversionOptions {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// An amount plus the conversion to apply to it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub amount: Decimal,
    #[serde(flatten)]
    pub options: ConversionOptions,
}

impl ConversionRequest {
    /// Parses an expression such as `"10 EUR to GBP"`.
    ///
    /// The connector may be `to`, `in` or `as`; currency codes are
    /// upper-cased and `,` thousands separators in the amount are ignored.
    pub fn parse(expression: &str) -> Result<Self, FxError> {
        let invalid = || FxError::InvalidExpression(expression.trim().to_string());

        let tokens: Vec<&str> = expression.split_whitespace().collect();
        let [amount, from, connector, to] = tokens.as_slice() else {
            return Err(invalid());
        };

        if !matches!(
            connector.to_ascii_lowercase().as_str(),
            "to" | "in" | "as"
        ) {
            return Err(invalid());
        }

        let amount = Decimal::from_str(&amount.replace(',', "")).map_err(|_| invalid())?;
        let is_code = |code: &str| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphabetic());
        if !is_code(*from) || !is_code(*to) {
            return Err(invalid());
        }

        Ok(Self {
            amount,
            options: ConversionOptions::new(from.to_ascii_uppercase(), to.to_ascii_uppercase()),
        })
    }
}

impl FromStr for ConversionRequest {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
