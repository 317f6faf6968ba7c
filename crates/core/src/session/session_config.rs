use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::SeedMode;
use crate::constants::{DEFAULT_ACCOUNT_BALANCE, DEFAULT_BASE_CURRENCY, DEFAULT_SYMBOLS};

/// Settings an [`ExchangeSession`](super::ExchangeSession) is created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Currencies requested on init, in display order
    pub symbols: Vec<String>,
    pub base_currency: String,
    /// Balance of every account seeded from a snapshot
    pub default_balance: Decimal,
    pub seed_mode: SeedMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            default_balance: DEFAULT_ACCOUNT_BALANCE,
            seed_mode: SeedMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.symbols, vec!["USD", "EUR", "GBP", "UAH"]);
        assert_eq!(config.base_currency, "USD");
        assert_eq!(config.default_balance, dec!(100));
        assert_eq!(config.seed_mode, SeedMode::Replace);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"symbols":["EUR","GBP"],"seedMode":"APPEND"}"#).unwrap();
        assert_eq!(config.symbols, vec!["EUR", "GBP"]);
        assert_eq!(config.base_currency, "USD");
        assert_eq!(config.seed_mode, SeedMode::Append);
    }
}
