//! Rate provider abstractions and implementations.
//!
//! - [`RatesProvider`] - the trait every rate source implements
//! - [`open_exchange_rates`] - HTTP provider for the Open Exchange Rates `latest.json` API
//! - [`static_rates`] - in-memory provider serving a fixed snapshot

pub mod open_exchange_rates;
pub mod static_rates;
mod traits;

pub use traits::RatesProvider;
