//! Reactive key/value state.
//!
//! A [`Store`] holds a fixed set of reactive keys and a list of observers per
//! key. Writes to a reactive key notify its observers synchronously.

mod store;

pub use store::Store;
