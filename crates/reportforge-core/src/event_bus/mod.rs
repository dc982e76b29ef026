//! # Event Bus Module
//!
//! A single-threaded publish/subscribe bus used for change notification
//! between the design model and its observers.
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter by category or predicate
//! - Handlers run synchronously, in subscription order, before `publish` returns
//!
//! There is no global instance: every bus is constructed and owned
//! explicitly by the component that publishes on it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reportforge_core::event_bus::{EventBus, EventFilter};
//!
//! let mut bus: EventBus<ModelEvent> = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::category(ModelEventCategory::Element),
//!     |event| tracing::debug!("element changed: {:?}", event),
//! );
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
