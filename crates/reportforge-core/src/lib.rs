//! # ReportForge Core
//!
//! Core types, errors and utilities shared by the ReportForge crates.
//! Provides the error taxonomy, stable node identifiers, the single-threaded
//! event bus and the user-visible log list.

pub mod error;
pub mod event_bus;
pub mod log;
pub mod types;

pub use error::{CodecError, Error, GestureError, ModelError, RenderError, Result};

pub use event_bus::{BusEvent, EventBus, EventFilter, SubscriptionId};

pub use log::{EventLog, LogEntry, LogLevel};

pub use types::{shared, shared_vec, ElementId, Listener, Shared, SharedVec};
