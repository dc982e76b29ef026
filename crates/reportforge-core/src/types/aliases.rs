//! Type aliases for commonly used complex types.
//!
//! The designer core is single-threaded, so the shared types here are all
//! `Rc<RefCell<T>>` based. Listener types are deliberately not `Send`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reportforge_core::types::*;
//!
//! let seen: SharedVec<HistoryState> = shared_vec();
//! let sink = seen.clone();
//! history.on_state_changed(Box::new(move |state| sink.borrow_mut().push(*state)));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// SINGLE-THREADED SHARED TYPES (Rc<RefCell<T>>)
// =============================================================================

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Use when listeners need to capture mutable state owned by the UI thread.
pub type Shared<T> = Rc<RefCell<T>>;

/// A shared vector, typically used to collect notifications.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

// =============================================================================
// LISTENER TYPES
// =============================================================================

/// A single-threaded listener receiving a borrowed value.
///
/// Listeners run synchronously on the publishing thread and must return
/// quickly.
pub type Listener<T> = Box<dyn Fn(&T)>;

// =============================================================================
// CONSTRUCTOR HELPERS
// =============================================================================

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new empty `SharedVec<T>`.
#[inline]
pub fn shared_vec<T>() -> SharedVec<T> {
    Rc::new(RefCell::new(Vec::new()))
}
