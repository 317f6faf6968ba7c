//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::BalanceChange;
use crate::exchange::{AmountInput, ExchangeReceipt, SelectedAccounts, SelectionSide};

/// Domain events emitted by the session after successful mutations.
///
/// These events represent facts about state changes. Front ends subscribe to
/// them instead of polling the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A new rate snapshot became current.
    RatesLoaded {
        base: String,
        timestamp: i64,
        /// Snapshot currencies in provider order
        currencies: Vec<String>,
    },

    /// Accounts were created from a rate snapshot.
    AccountsSeeded { account_ids: Vec<String> },

    /// An account balance was written.
    BalanceUpdated {
        account_id: String,
        currency: String,
        old_balance: Decimal,
        new_balance: Decimal,
    },

    /// The exchange source or destination changed.
    SelectionChanged {
        from_id: Option<String>,
        to_id: Option<String>,
    },

    /// An entered amount changed. `None` means the field was cleared.
    InputChanged {
        side: SelectionSide,
        value: Option<Decimal>,
    },

    /// Both legs of an exchange were applied.
    ExchangeCompleted {
        from_id: String,
        to_id: String,
        debited: Decimal,
        credited: Decimal,
    },
}

impl DomainEvent {
    /// Creates a RatesLoaded event.
    pub fn rates_loaded(base: String, timestamp: i64, currencies: Vec<String>) -> Self {
        Self::RatesLoaded {
            base,
            timestamp,
            currencies,
        }
    }

    pub fn accounts_seeded(account_ids: Vec<String>) -> Self {
        Self::AccountsSeeded { account_ids }
    }

    /// Creates a BalanceUpdated event from a registry change.
    pub fn balance_updated(change: &BalanceChange) -> Self {
        Self::BalanceUpdated {
            account_id: change.account_id.clone(),
            currency: change.currency.clone(),
            old_balance: change.old_balance,
            new_balance: change.new_balance,
        }
    }

    pub fn selection_changed(selected: &SelectedAccounts) -> Self {
        Self::SelectionChanged {
            from_id: selected.from.clone(),
            to_id: selected.to.clone(),
        }
    }

    pub fn input_changed(side: SelectionSide, value: AmountInput) -> Self {
        Self::InputChanged {
            side,
            value: value.value(),
        }
    }

    /// Creates an ExchangeCompleted event. The amounts are the actual balance deltas.
    pub fn exchange_completed(receipt: &ExchangeReceipt) -> Self {
        Self::ExchangeCompleted {
            from_id: receipt.debit.account_id.clone(),
            to_id: receipt.credit.account_id.clone(),
            debited: receipt.debit.old_balance - receipt.debit.new_balance,
            credited: receipt.credit.new_balance - receipt.credit.old_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn receipt() -> ExchangeReceipt {
        ExchangeReceipt {
            debit: BalanceChange {
                account_id: "acc-usd".to_string(),
                currency: "USD".to_string(),
                old_balance: dec!(100),
                new_balance: dec!(70),
            },
            credit: BalanceChange {
                account_id: "acc-eur".to_string(),
                currency: "EUR".to_string(),
                old_balance: dec!(100),
                new_balance: dec!(127),
            },
        }
    }

    #[test]
    fn test_domain_event_serialization() {
        let event = DomainEvent::rates_loaded(
            "USD".to_string(),
            1_700_000_000,
            vec!["USD".to_string(), "EUR".to_string()],
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"rates_loaded\""));

        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        match deserialized {
            DomainEvent::RatesLoaded {
                base,
                timestamp,
                currencies,
            } => {
                assert_eq!(base, "USD");
                assert_eq!(timestamp, 1_700_000_000);
                assert_eq!(currencies, vec!["USD", "EUR"]);
            }
            _ => panic!("Expected RatesLoaded"),
        }
    }

    #[test]
    fn test_exchange_completed_from_receipt() {
        let event = DomainEvent::exchange_completed(&receipt());
        assert_eq!(
            event,
            DomainEvent::ExchangeCompleted {
                from_id: "acc-usd".to_string(),
                to_id: "acc-eur".to_string(),
                debited: dec!(30),
                credited: dec!(27),
            }
        );
    }

    #[test]
    fn test_input_changed_serialization() {
        let event = DomainEvent::input_changed(SelectionSide::To, AmountInput::Empty);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"side\":\"to\""));
        assert!(json.contains("\"value\":null"));

        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }
}
