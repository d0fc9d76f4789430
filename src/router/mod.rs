//! Hash-fragment routing.
//!
//! A [`RouteTable`] resolves a hash into a [`MountDecision`] without touching
//! any platform state; a [`Router`] applies that decision through the
//! navigation and mount ports.

mod query;
mod route;
mod router;

pub use query::{split_hash, QueryMap};
pub use route::{MountDecision, Route, RouteTable};
pub use router::{Router, RouterOptions, RouterState};
