//! Core error types for pocketfx.
//!
//! Every failure in this crate is recoverable and is handed back to the
//! caller (the UI layer) as one of these variants. Nothing here is fatal.

use thiserror::Error;

use crate::exchange::ExchangeError;
use crate::fx::FxError;
use pocketfx_rates::RatesError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for pocketfx.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch exchange rates: {0}")]
    Rates(#[from] RatesError),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
