use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::CurrencyCode;
use crate::errors::RatesError;

/// Exchange rates relative to `base`, as returned by a provider at `timestamp`.
///
/// A snapshot is never patched. Refreshing rates produces a new snapshot that
/// replaces the previous one wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub license: String,
    /// Unix timestamp (seconds) of the rates
    pub timestamp: i64,
    pub base: CurrencyCode,
    pub rates: CurrencyRates,
}

impl RateSnapshot {
    pub fn new(base: impl Into<CurrencyCode>, timestamp: i64, rates: CurrencyRates) -> Self {
        Self {
            disclaimer: String::new(),
            license: String::new(),
            timestamp,
            base: base.into(),
            rates,
        }
    }

    /// The instant the rates were published, if the timestamp is representable.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Currency codes in provider order.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        self.rates.codes().map(str::to_string).collect()
    }

    /// Rate of `code` relative to the base currency.
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code)
    }

    /// Returns a copy restricted to `symbols`, keeping provider order.
    ///
    /// An empty `symbols` slice keeps every rate.
    pub fn filtered(&self, symbols: &[String]) -> Self {
        if symbols.is_empty() {
            return self.clone();
        }
        let rates = self
            .rates
            .iter()
            .filter(|(code, _)| symbols.iter().any(|s| s.as_str() == *code))
            .map(|(code, rate)| (code.to_string(), rate))
            .collect();
        Self {
            rates,
            ..self.clone()
        }
    }

    /// Checks that the snapshot can back a converter.
    pub fn validate(&self) -> Result<(), RatesError> {
        if self.base.trim().is_empty() {
            return Err(RatesError::ValidationFailed {
                message: "Snapshot has no base currency".to_string(),
            });
        }
        if self.rates.is_empty() {
            return Err(RatesError::ValidationFailed {
                message: format!("Snapshot for base {} contains no rates", self.base),
            });
        }
        if let Some((code, rate)) = self.rates.iter().find(|(_, rate)| *rate <= Decimal::ZERO) {
            return Err(RatesError::ValidationFailed {
                message: format!("Non-positive rate {} for {}", rate, code),
            });
        }
        Ok(())
    }
}

/// Currency code to rate table that keeps the order the provider listed it in.
///
/// Serialized as a JSON object. Accounts are created in this order, so it is
/// not a `HashMap`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurrencyRates(Vec<(CurrencyCode, Decimal)>);

impl CurrencyRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a rate. Overwriting keeps the original position.
    pub fn insert(&mut self, code: impl Into<CurrencyCode>, rate: Decimal) {
        let code = code.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == code) {
            Some(entry) => entry.1 = rate,
            None => self.0.push((code, rate)),
        }
    }

    pub fn get(&self, code: &str) -> Option<Decimal> {
        self.0
            .iter()
            .find(|(existing, _)| existing == code)
            .map(|(_, rate)| *rate)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|(existing, _)| existing == code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(code, _)| code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<C: Into<CurrencyCode>> FromIterator<(C, Decimal)> for CurrencyRates {
    fn from_iter<I: IntoIterator<Item = (C, Decimal)>>(iter: I) -> Self {
        let mut rates = CurrencyRates::new();
        for (code, rate) in iter {
            rates.insert(code, rate);
        }
        rates
    }
}

impl Serialize for CurrencyRates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, rate) in &self.0 {
            map.serialize_entry(code, rate)?;
        }
        map.end()
    }
}

struct CurrencyRatesVisitor;

impl<'de> Visitor<'de> for CurrencyRatesVisitor {
    type Value = CurrencyRates;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of currency codes to numeric rates")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut rates = CurrencyRates(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((code, rate)) = access.next_entry::<String, Decimal>()? {
            rates.insert(code, rate);
        }
        Ok(rates)
    }
}

impl<'de> Deserialize<'de> for CurrencyRates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CurrencyRatesVisitor)
    }
}
