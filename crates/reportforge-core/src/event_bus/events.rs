//! Event trait and filters for the event bus.
//!
//! The bus itself is generic; each crate defines its own event enum and
//! implements [`BusEvent`] for it so subscribers can filter by category.

use std::fmt;
use std::rc::Rc;

/// An event that can travel over an [`EventBus`](super::EventBus)
pub trait BusEvent: Clone + fmt::Debug {
    /// Coarse grouping used by [`EventFilter::Categories`]
    type Category: Copy + Eq + fmt::Debug;

    /// Get the category of this event
    fn category(&self) -> Self::Category;

    /// Get a short description of this event for logging
    fn description(&self) -> String {
        format!("{:?}", self)
    }
}

/// Filter to receive only specific events
pub enum EventFilter<E: BusEvent> {
    /// Receive all events.
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<E::Category>),
    /// Receive events for which the predicate returns true.
    Matching(Rc<dyn Fn(&E) -> bool>),
}

impl<E: BusEvent> EventFilter<E> {
    /// Filter on a single category
    pub fn category(category: E::Category) -> Self {
        EventFilter::Categories(vec![category])
    }

    /// Filter with an arbitrary predicate
    pub fn matching(predicate: impl Fn(&E) -> bool + 'static) -> Self {
        EventFilter::Matching(Rc::new(predicate))
    }

    /// Check if an event matches this filter
    pub fn matches(&self, event: &E) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
            EventFilter::Matching(predicate) => predicate(event),
        }
    }
}

impl<E: BusEvent> Default for EventFilter<E> {
    fn default() -> Self {
        EventFilter::All
    }
}

impl<E: BusEvent> Clone for EventFilter<E> {
    fn clone(&self) -> Self {
        match self {
            EventFilter::All => EventFilter::All,
            EventFilter::Categories(c) => EventFilter::Categories(c.clone()),
            EventFilter::Matching(p) => EventFilter::Matching(Rc::clone(p)),
        }
    }
}

impl<E: BusEvent> fmt::Debug for EventFilter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventFilter::All => write!(f, "All"),
            EventFilter::Categories(c) => f.debug_tuple("Categories").field(c).finish(),
            EventFilter::Matching(_) => write!(f, "Matching(..)"),
        }
    }
}
