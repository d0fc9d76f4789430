use super::MountTarget;
use crate::component::Element;
use std::sync::{Arc, RwLock};

/// In-memory view slot. Clones share the same children.
#[derive(Clone, Default)]
pub struct RouterView {
    children: Arc<RwLock<Vec<Element>>>,
}

impl RouterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the currently mounted elements.
    pub fn children(&self) -> Vec<Element> {
        self.children.read().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.children.read().unwrap().is_empty()
    }

    /// The slot and its children as an element named `router-view`.
    pub fn to_element(&self) -> Element {
        let mut el = Element::new("router-view");
        for child in self.children.read().unwrap().iter() {
            el.append(child.clone());
        }
        el
    }
}

impl MountTarget for RouterView {
    fn clear(&self) {
        self.children.write().unwrap().clear();
    }

    fn append(&self, element: Element) {
        self.children.write().unwrap().push(element);
    }
}
