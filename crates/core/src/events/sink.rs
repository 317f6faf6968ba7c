//! Where the session sends its domain events.

use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;

use super::DomainEvent;

/// Receiver of the events an [`ExchangeSession`](crate::session::ExchangeSession)
/// emits after each successful mutation.
///
/// `emit()` is called synchronously from `&mut self` session methods, so it
/// must return quickly and must not fail. Front ends that need async delivery
/// use [`EventBus`](super::EventBus).
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    /// Emits events that belong to one mutation, in order.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        events.into_iter().for_each(|event| self.emit(event));
    }
}

impl<S: DomainEventSink + ?Sized> DomainEventSink for Arc<S> {
    fn emit(&self, event: DomainEvent) {
        (**self).emit(event);
    }

    fn emit_batch(&self, events: Vec<DomainEvent>) {
        (**self).emit_batch(events);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Records events in emission order. Clones share one log.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    log: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.log().clone()
    }

    /// Returns the recorded events and starts a fresh log.
    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.log())
    }

    pub fn last(&self) -> Option<DomainEvent> {
        self.log().last().cloned()
    }

    pub fn clear(&self) {
        self.log().clear();
    }

    pub fn len(&self) -> usize {
        self.log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log().is_empty()
    }

    /// `(account_id, new_balance)` of every recorded balance write.
    pub fn balance_updates(&self) -> Vec<(String, Decimal)> {
        self.log()
            .iter()
            .filter_map(|event| match event {
                DomainEvent::BalanceUpdated {
                    account_id,
                    new_balance,
                    ..
                } => Some((account_id.clone(), *new_balance)),
                _ => None,
            })
            .collect()
    }

    // A panicking test thread must not hide the events recorded so far
    fn log(&self) -> MutexGuard<'_, Vec<DomainEvent>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.log().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::BalanceChange;
    use crate::exchange::{AmountInput, SelectionSide};
    use rust_decimal_macros::dec;

    fn balance_updated(id: &str, old: Decimal, new: Decimal) -> DomainEvent {
        DomainEvent::balance_updated(&BalanceChange {
            account_id: id.to_string(),
            currency: "USD".to_string(),
            old_balance: old,
            new_balance: new,
        })
    }

    #[test]
    fn test_noop_sink_accepts_events() {
        let sink = NoOpDomainEventSink;
        sink.emit(DomainEvent::accounts_seeded(vec!["a".to_string()]));
        sink.emit_batch(vec![DomainEvent::input_changed(
            SelectionSide::From,
            AmountInput::Empty,
        )]);
    }

    #[test]
    fn test_mock_sink_records_in_order() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        sink.emit(DomainEvent::accounts_seeded(vec!["a".to_string()]));
        sink.emit_batch(vec![
            balance_updated("a", dec!(100), dec!(70)),
            DomainEvent::input_changed(SelectionSide::To, AmountInput::from(dec!(5))),
        ]);

        assert_eq!(sink.len(), 3);
        assert_eq!(
            sink.last(),
            Some(DomainEvent::InputChanged {
                side: SelectionSide::To,
                value: Some(dec!(5)),
            })
        );
        assert_eq!(sink.balance_updates(), vec![("a".to_string(), dec!(70))]);

        let taken = sink.take();
        assert_eq!(taken.len(), 3);
        assert!(sink.is_empty());
        assert_eq!(sink.last(), None);
    }

    #[test]
    fn test_shared_sink_through_arc() {
        let sink = MockDomainEventSink::new();
        let shared: Arc<dyn DomainEventSink> = Arc::new(sink.clone());
        let forwarded = Arc::new(shared);

        forwarded.emit_batch(vec![
            balance_updated("a", dec!(1), dec!(2)),
            balance_updated("b", dec!(3), dec!(4)),
        ]);

        assert_eq!(
            sink.balance_updates(),
            vec![("a".to_string(), dec!(2)), ("b".to_string(), dec!(4))]
        );
    }
}
