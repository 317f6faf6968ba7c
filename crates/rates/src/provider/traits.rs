//! Rate provider trait definition.

use async_trait::async_trait;

use crate::errors::RatesError;
use crate::models::RateSnapshot;

/// Source of exchange-rate snapshots.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use pocketfx_rates::{RateSnapshot, RatesError, RatesProvider};
///
/// struct FixedProvider(RateSnapshot);
///
/// #[async_trait]
/// impl RatesProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_rates(
///         &self,
///         symbols: &[String],
///         _base: &str,
///     ) -> Result<RateSnapshot, RatesError> {
///         Ok(self.0.filtered(symbols))
///     }
/// }
/// ```
#[async_trait]
pub trait RatesProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the latest rates for `symbols` relative to `base`.
    ///
    /// # Arguments
    ///
    /// * `symbols` - Currency codes to include. Empty means every currency the provider knows.
    /// * `base` - Currency the returned rates are expressed against.
    ///
    /// # Returns
    ///
    /// A complete snapshot on success. Providers never return partial data on failure.
    async fn fetch_rates(&self, symbols: &[String], base: &str)
        -> Result<RateSnapshot, RatesError>;
}
