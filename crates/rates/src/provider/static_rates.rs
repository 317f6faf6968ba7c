//! In-memory provider serving a fixed snapshot.
//!
//! Used for offline runs and tests.

use async_trait::async_trait;

use crate::errors::RatesError;
use crate::models::RateSnapshot;
use crate::provider::RatesProvider;

/// Provider ID constant
pub const PROVIDER_ID: &str = "STATIC";

pub struct StaticRatesProvider {
    snapshot: RateSnapshot,
}

impl StaticRatesProvider {
    pub fn new(snapshot: RateSnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl RatesProvider for StaticRatesProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_rates(
        &self,
        symbols: &[String],
        base: &str,
    ) -> Result<RateSnapshot, RatesError> {
        if !self.snapshot.base.eq_ignore_ascii_case(base) {
            return Err(RatesError::UnsupportedBase(base.to_string()));
        }
        let snapshot = self.snapshot.filtered(symbols);
        snapshot.validate()?;
        log::debug!(
            "Serving static snapshot for {} with {} currencies",
            snapshot.base,
            snapshot.rates.len()
        );
        Ok(snapshot)
    }
}
