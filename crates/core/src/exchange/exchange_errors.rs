use thiserror::Error;

use super::exchange_model::SelectionSide;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// A side has no account selected, or its account is no longer registered.
    #[error("Unresolved {side} selection{}", missing_account(.account_id))]
    UnresolvedSelection {
        side: SelectionSide,
        account_id: Option<String>,
    },

    #[error("Exchange amount overflows the {0} balance")]
    AmountOverflow(SelectionSide),
}

fn missing_account(account_id: &Option<String>) -> String {
    match account_id {
        Some(id) => format!(": account '{}' not found", id),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_selection_messages() {
        let err = ExchangeError::UnresolvedSelection {
            side: SelectionSide::From,
            account_id: None,
        };
        assert_eq!(err.to_string(), "Unresolved from selection");

        let err = ExchangeError::UnresolvedSelection {
            side: SelectionSide::To,
            account_id: Some("abc".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Unresolved to selection: account 'abc' not found"
        );
    }
}
