//! Domain events module.
//!
//! Provides domain event types and the sink trait the session emits through
//! after every successful mutation. Front ends either inject their own sink or
//! subscribe to an [`EventBus`].

mod bus;
mod domain_event;
mod sink;

pub use bus::*;
pub use domain_event::*;
pub use sink::*;
