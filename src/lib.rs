//! # Hashnav
//!
//! A small runtime for hash-routed single-page applications.
//!
//! ## Router
//!
//! - `RouteTable` - ordered path patterns, first match wins
//! - `Router` - renders the matching component into a view slot on start
//!   and on every back/forward navigation
//! - `QueryMap` - query parameters kept in the history entry's state
//!
//! ## Store
//!
//! - `Store<V>` - key/value state whose initial keys notify subscribers
//!   synchronously on every write
//!
//! Browser access goes through the ports in [`navigation`], which also ships
//! in-memory implementations for headless use and tests.

pub mod component;
pub mod error;
pub mod navigation;
pub mod router;
pub mod store;

// Re-export main types for convenience
pub use component::{Component, ComponentBase, ComponentFactory, ComponentPayload, Element};
pub use error::{Error, Result};
pub use router::{MountDecision, QueryMap, Route, RouteTable, Router, RouterOptions, RouterState};
pub use store::Store;
