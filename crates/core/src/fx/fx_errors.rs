use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("Converter is not initialized: no exchange rates loaded")]
    NotInitialized,

    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Invalid conversion expression: {0}")]
    InvalidExpression(String),
}
