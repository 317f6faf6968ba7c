//! FX (Foreign Exchange) module - conversion, rounding and display formatting.

pub mod currency;
pub mod currency_converter;
mod fx_errors;
mod fx_model;

pub use currency::{currency_symbol, format_currency, round_amount};
pub use currency_converter::CurrencyConverter;
pub use fx_errors::FxError;
pub use fx_model::{ConversionOptions, ConversionRequest};
