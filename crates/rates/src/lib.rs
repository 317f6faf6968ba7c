//! pocketfx Rates Crate
//!
//! This crate provides provider-agnostic exchange-rate fetching for pocketfx.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+
//! |  ExchangeSession | --> |  RatesProvider   |  (trait object, injected)
//! +------------------+     +------------------+
//!                                  |
//!                 +----------------+----------------+
//!                 v                                 v
//!      +----------------------+          +--------------------+
//!      | OpenExchangeRates    |          | StaticRatesProvider|
//!      | (HTTP, latest.json)  |          | (in-memory)        |
//!      +----------------------+          +--------------------+
//!                 |                                 |
//!                 +----------------+----------------+
//!                                  v
//!                          +------------------+
//!                          |   RateSnapshot   |  (immutable)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RateSnapshot`] - Rates relative to one base currency, fetched at one instant
//! - [`CurrencyRates`] - Ordered currency code to rate mapping
//! - [`RatesProvider`] - The fetch contract every provider implements
//! - [`RatesError`] - Errors raised while fetching or validating rates

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::RatesError;
pub use models::{CurrencyCode, CurrencyRates, RateSnapshot};
pub use provider::open_exchange_rates::{OpenExchangeRatesConfig, OpenExchangeRatesProvider};
pub use provider::static_rates::StaticRatesProvider;
pub use provider::RatesProvider;
