//! Accounts module - domain models and the session's account registry.

mod accounts_model;
mod accounts_registry;


// Re-export the public interface
pub use accounts_model::{Account, BalanceChange, NewAccount};
pub use accounts_registry::{AccountRegistry, SeedMode};
