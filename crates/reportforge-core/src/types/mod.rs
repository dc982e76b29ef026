//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` and listener callbacks
//! - [`ids`]: Stable node identifiers

pub mod aliases;
pub mod ids;

pub use aliases::*;
pub use ids::*;
