//! pocketfx Core - Domain entities, services, and traits.
//!
//! This crate holds the client-side state of the exchange application:
//! per-currency accounts, the current rate snapshot and converter, and the
//! account selection / exchange workflow. Everything is owned by one
//! [`session::ExchangeSession`] per user session.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod events;
pub mod exchange;
pub mod fx;
pub mod session;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

pub use pocketfx_rates::{RateSnapshot, RatesError, RatesProvider};
