//! Session module - the per-user container for rates, accounts and the exchange workflow.

mod exchange_session;
mod session_config;


pub use exchange_session::ExchangeSession;
pub use session_config::SessionConfig;
