//! Component base and element tree.
//!
//! Concrete pages embed a [`ComponentBase`], implement [`Component`], and are
//! registered with the router through a [`ComponentFactory`].

mod component;
mod element;

pub use component::{Component, ComponentBase, ComponentFactory, ComponentPayload};
pub use element::Element;
