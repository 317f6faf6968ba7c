use tokio::sync::broadcast;

use super::{DomainEvent, DomainEventSink};

pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 64;

/// Broadcast bus that fans domain events out to every subscriber.
///
/// Subscribers only see events published after they subscribed.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn publish(&self, event: DomainEvent) {
        // No subscribers and lagging listeners are both fine here
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUS_CAPACITY)
    }
}

impl DomainEventSink for EventBus {
    fn emit(&self, event: DomainEvent) {
        self.publish(event);
    }
}
