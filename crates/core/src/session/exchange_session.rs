use std::sync::Arc;

use log::{debug, error, info};
use rust_decimal::Decimal;

use super::session_config::SessionConfig;
use crate::accounts::{Account, AccountRegistry, BalanceChange};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::exchange::{
    AccountSelection, AmountInput, ExchangeReceipt, ExchangeWorkflow, SelectedAccounts,
    SelectionSide,
};
use crate::fx::{format_currency, ConversionOptions, ConversionRequest, CurrencyConverter, FxError};
use pocketfx_rates::{RateSnapshot, RatesProvider};

/// State of one user session: the current rate snapshot and converter, the
/// accounts seeded from it, and the exchange selection and inputs.
///
/// Every mutation goes through `&mut self` and is reported to the event sink
/// once it has succeeded.
pub struct ExchangeSession {
    config: SessionConfig,
    provider: Arc<dyn RatesProvider>,
    event_sink: Arc<dyn DomainEventSink>,
    snapshot: Option<RateSnapshot>,
    converter: Option<CurrencyConverter>,
    registry: AccountRegistry,
    workflow: ExchangeWorkflow,
}

impl ExchangeSession {
    pub fn new(
        config: SessionConfig,
        provider: Arc<dyn RatesProvider>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            config,
            provider,
            event_sink,
            snapshot: None,
            converter: None,
            registry: AccountRegistry::new(),
            workflow: ExchangeWorkflow::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Fetches the configured symbols and makes the result the current snapshot.
    ///
    /// On failure the session keeps whatever state it had.
    pub async fn init(&mut self) -> Result<()> {
        debug!(
            "Fetching rates for {:?} against {} from {}",
            self.config.symbols,
            self.config.base_currency,
            self.provider.id()
        );
        let snapshot = match self
            .provider
            .fetch_rates(&self.config.symbols, &self.config.base_currency)
            .await
        {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(
                    "Failed to fetch rates from {}: {}",
                    self.provider.id(),
                    e
                );
                return Err(e.into());
            }
        };

        self.set_rates(snapshot);
        Ok(())
    }

    /// Replaces the current snapshot, rebuilds the converter and seeds accounts
    /// according to the configured seed mode.
    pub fn set_rates(&mut self, snapshot: RateSnapshot) {
        let account_ids =
            self.registry
                .seed(&snapshot, self.config.default_balance, self.config.seed_mode);
        self.converter = Some(CurrencyConverter::new(&snapshot));

        info!(
            "Loaded {} rates against {} (timestamp {})",
            snapshot.rates.len(),
            snapshot.base,
            snapshot.timestamp
        );
        self.event_sink.emit_batch(vec![
            DomainEvent::rates_loaded(
                snapshot.base.clone(),
                snapshot.timestamp,
                snapshot.currencies(),
            ),
            DomainEvent::accounts_seeded(account_ids),
        ]);
        self.snapshot = Some(snapshot);
    }

    pub fn rates(&self) -> Option<&RateSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.converter.is_some()
    }

    /// Copy of all accounts in creation order.
    pub fn accounts(&self) -> Vec<Account> {
        self.registry.as_list()
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.registry.find_by_id(id)
    }

    /// Writes a balance directly. Returns `None` if the account does not exist.
    pub fn update_balance(&mut self, id: &str, balance: Decimal) -> Option<BalanceChange> {
        let change = self.registry.update_balance(id, balance)?;
        self.event_sink.emit(DomainEvent::balance_updated(&change));
        Some(change)
    }

    /// Changes the exchange source and/or destination.
    pub fn select_accounts(&mut self, selection: AccountSelection) {
        if self.workflow.select(&self.registry, selection) {
            self.event_sink
                .emit(DomainEvent::selection_changed(self.workflow.selected()));
        }
    }

    pub fn selected_accounts(&self) -> &SelectedAccounts {
        self.workflow.selected()
    }

    /// The selected source account, if it is still registered.
    pub fn selected_from(&self) -> Option<&Account> {
        self.selected(SelectionSide::From)
    }

    /// The selected destination account, if it is still registered.
    pub fn selected_to(&self) -> Option<&Account> {
        self.selected(SelectionSide::To)
    }

    fn selected(&self, side: SelectionSide) -> Option<&Account> {
        self.workflow
            .selected()
            .get(side)
            .and_then(|id| self.registry.find_by_id(id))
    }

    pub fn set_input_from(&mut self, value: impl Into<AmountInput>) {
        self.set_input(SelectionSide::From, value.into());
    }

    pub fn set_input_to(&mut self, value: impl Into<AmountInput>) {
        self.set_input(SelectionSide::To, value.into());
    }

    fn set_input(&mut self, side: SelectionSide, value: AmountInput) {
        self.workflow.set_input(side, value);
        self.event_sink.emit(DomainEvent::input_changed(side, value));
    }

    pub fn input_from(&self) -> AmountInput {
        self.workflow.input(SelectionSide::From)
    }

    pub fn input_to(&self) -> AmountInput {
        self.workflow.input(SelectionSide::To)
    }

    pub fn clear_inputs(&mut self) {
        self.workflow.clear_inputs();
        self.event_sink.emit_batch(vec![
            DomainEvent::input_changed(SelectionSide::From, AmountInput::Empty),
            DomainEvent::input_changed(SelectionSide::To, AmountInput::Empty),
        ]);
    }

    fn converter(&self) -> Result<&CurrencyConverter> {
        Ok(self.converter.as_ref().ok_or(FxError::NotInitialized)?)
    }

    /// Converts `amount` with the current snapshot, rounded to 2 decimals.
    pub fn convert(&self, amount: Decimal, options: &ConversionOptions) -> Result<Decimal> {
        Ok(self.converter()?.convert(amount, options)?)
    }

    /// Evaluates an expression such as `"10 EUR to GBP"`.
    pub fn convert_expression(&self, expression: &str) -> Result<Decimal> {
        let converter = self.converter()?;
        let request = ConversionRequest::parse(expression)?;
        Ok(converter.convert(request.amount, &request.options)?)
    }

    /// Rate turning one unit of `from` into `to`.
    pub fn get_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        Ok(self.converter()?.get_rate(from, to)?)
    }

    pub fn format(&self, value: Decimal, currency_code: &str) -> String {
        format_currency(value, currency_code)
    }

    /// Applies the entered amounts to the selected accounts.
    pub fn exchange(&mut self) -> Result<ExchangeReceipt> {
        let receipt = self.workflow.exchange(&mut self.registry)?;
        self.event_sink.emit_batch(vec![
            DomainEvent::balance_updated(&receipt.debit),
            DomainEvent::balance_updated(&receipt.credit),
            DomainEvent::exchange_completed(&receipt),
        ]);
        Ok(receipt)
    }
}
