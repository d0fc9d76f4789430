//! Platform ports consumed by the router.
//!
//! [`NavigationPort`] stands in for `location`/`history`/`window`, and
//! [`MountTarget`] for the view slot element. [`MemoryNavigation`] and
//! [`RouterView`] implement them in memory.

mod memory;
mod port;
mod view;

pub use memory::{HistoryEntry, MemoryNavigation};
pub use port::{MountTarget, NavigationPort, PopStateListener};
pub use view::RouterView;
