//! # Event Bus Module
//!
//! Subscribe/notify channel owned by the workspace store.
//!
//! The bus is an explicitly constructed instance: the application creates
//! it, hands it to the store, and passes clones of the `Arc` to whoever
//! needs to observe the store. There is no process-wide instance.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gardenkit_core::event_bus::{EventBus, EventCategory, EventFilter, StoreEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Document]),
//!     |event| {
//!         if let StoreEvent::DocumentCommitted { layout_id, .. } = event {
//!             println!("layout {layout_id} changed");
//!         }
//!     },
//! );
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::{EventBus, EventBusConfig, EventBusError, EventFilter, SubscriptionId};
pub use events::{EventCategory, StoreEvent};
