//! Exchange module - account selection, entered amounts and the balance transfer.

mod exchange_errors;
mod exchange_model;
mod exchange_workflow;


pub use exchange_errors::ExchangeError;
pub use exchange_model::{
    AccountSelection, AmountInput, ExchangeReceipt, SelectedAccounts, SelectionSide,
};
pub use exchange_workflow::ExchangeWorkflow;
