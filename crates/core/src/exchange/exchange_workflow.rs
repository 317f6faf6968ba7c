use log::{debug, warn};

use super::exchange_errors::ExchangeError;
use super::exchange_model::{
    AccountSelection, AmountInput, ExchangeReceipt, SelectedAccounts, SelectionSide,
};
use crate::accounts::{Account, AccountRegistry};
use crate::fx::round_amount;

/// Source/destination selection plus the two entered amounts.
///
/// The workflow does not own accounts. Selections are ids that are looked up
/// in the registry on every use.
#[derive(Debug, Clone, Default)]
pub struct ExchangeWorkflow {
    selected: SelectedAccounts,
    input_from: AmountInput,
    input_to: AmountInput,
}

impl ExchangeWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &SelectedAccounts {
        &self.selected
    }

    pub fn input(&self, side: SelectionSide) -> AmountInput {
        match side {
            SelectionSide::From => self.input_from,
            SelectionSide::To => self.input_to,
        }
    }

    /// Applies `selection` and returns true if any side was addressed.
    ///
    /// An id that does not resolve leaves that side explicitly unset.
    /// Blank ids are ignored.
    pub fn select(&mut self, registry: &AccountRegistry, selection: AccountSelection) -> bool {
        let mut changed = false;
        if let Some(id) = selection.from_id.filter(|id| !id.is_empty()) {
            self.selected.from = Self::resolve_for_selection(registry, SelectionSide::From, id);
            changed = true;
        }
        if let Some(id) = selection.to_id.filter(|id| !id.is_empty()) {
            self.selected.to = Self::resolve_for_selection(registry, SelectionSide::To, id);
            changed = true;
        }
        changed
    }

    fn resolve_for_selection(
        registry: &AccountRegistry,
        side: SelectionSide,
        id: String,
    ) -> Option<String> {
        if registry.contains(&id) {
            debug!("Selected account {} as exchange {}", id, side);
            Some(id)
        } else {
            warn!("Account {} not found; clearing exchange {} selection", id, side);
            None
        }
    }

    pub fn set_input(&mut self, side: SelectionSide, value: AmountInput) {
        match side {
            SelectionSide::From => self.input_from = value,
            SelectionSide::To => self.input_to = value,
        }
    }

    pub fn clear_inputs(&mut self) {
        self.input_from = AmountInput::Empty;
        self.input_to = AmountInput::Empty;
    }

    fn resolve<'a>(
        &self,
        registry: &'a AccountRegistry,
        side: SelectionSide,
    ) -> Result<&'a Account, ExchangeError> {
        let id = self
            .selected
            .get(side)
            .ok_or(ExchangeError::UnresolvedSelection {
                side,
                account_id: None,
            })?;
        registry
            .find_by_id(id)
            .ok_or_else(|| ExchangeError::UnresolvedSelection {
                side,
                account_id: Some(id.to_string()),
            })
    }

    /// Debits `input_from` from the source and credits `input_to` to the destination.
    ///
    /// Both sides are resolved and both new balances computed before anything
    /// is written, so a failure leaves every account untouched. The amounts are
    /// not checked against the live rate, and inputs are kept afterwards.
    pub fn exchange(&self, registry: &mut AccountRegistry) -> Result<ExchangeReceipt, ExchangeError> {
        let from = self.resolve(registry, SelectionSide::From)?;
        let to = self.resolve(registry, SelectionSide::To)?;

        let from_id = from.id().to_string();
        let to_id = to.id().to_string();

        let debited = from
            .balance()
            .checked_sub(self.input_from.amount())
            .ok_or(ExchangeError::AmountOverflow(SelectionSide::From))?;

        // Selecting one account for both sides credits the already debited balance
        let credit_base = if from_id == to_id {
            round_amount(debited)
        } else {
            to.balance()
        };
        let credited = credit_base
            .checked_add(self.input_to.amount())
            .ok_or(ExchangeError::AmountOverflow(SelectionSide::To))?;

        let missing = |side: SelectionSide, id: &str| ExchangeError::UnresolvedSelection {
            side,
            account_id: Some(id.to_string()),
        };
        let debit = registry
            .update_balance(&from_id, debited)
            .ok_or_else(|| missing(SelectionSide::From, &from_id))?;
        let credit = registry
            .update_balance(&to_id, credited)
            .ok_or_else(|| missing(SelectionSide::To, &to_id))?;

        debug!(
            "Exchanged {} {} -> {} {}",
            self.input_from.amount(),
            debit.currency,
            self.input_to.amount(),
            credit.currency
        );
        Ok(ExchangeReceipt { debit, credit })
    }
}
