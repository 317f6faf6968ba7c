//! Rate models
//!
//! - `types` - Type aliases for common identifiers (CurrencyCode)
//! - `snapshot` - The immutable rate snapshot and its ordered rate table

mod snapshot;
mod types;

pub use snapshot::{CurrencyRates, RateSnapshot};
pub use types::CurrencyCode;
