use super::Element;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Options for building a [`ComponentBase`].
#[derive(Debug, Clone, Default)]
pub struct ComponentPayload {
    /// Root element tag; `div` when unset.
    pub tag_name: Option<String>,
    /// Data handed down by the parent.
    pub props: Map<String, Value>,
    /// Data owned by the component.
    pub state: Map<String, Value>,
}

/// Root element plus `props` and `state`, embedded by concrete components.
#[derive(Debug, Clone)]
pub struct ComponentBase {
    pub el: Element,
    pub props: Map<String, Value>,
    pub state: Map<String, Value>,
}

impl ComponentBase {
    pub fn new(payload: ComponentPayload) -> Self {
        let tag = payload.tag_name.as_deref().unwrap_or("div");
        Self {
            el: Element::new(tag),
            props: payload.props,
            state: payload.state,
        }
    }
}

impl Default for ComponentBase {
    fn default() -> Self {
        Self::new(ComponentPayload::default())
    }
}

/// A UI component that exposes a root element to mount.
///
/// `render` is invoked exactly once, when the component is built through a
/// [`ComponentFactory`].
pub trait Component: Send {
    fn el(&self) -> &Element;

    fn render(&mut self) {}
}

/// Zero-argument constructor for a [`Component`].
#[derive(Clone)]
pub struct ComponentFactory {
    build: Arc<dyn Fn() -> Box<dyn Component> + Send + Sync>,
}

impl ComponentFactory {
    pub fn new<F, C>(constructor: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Component + 'static,
    {
        Self {
            build: Arc::new(move || {
                let mut component = constructor();
                component.render();
                Box::new(component) as Box<dyn Component>
            }),
        }
    }

    /// Construct and render a fresh instance.
    pub fn build(&self) -> Box<dyn Component> {
        (self.build)()
    }
}

impl fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentFactory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static RENDERS: AtomicUsize = AtomicUsize::new(0);

    struct Greeting {
        base: ComponentBase,
    }

    impl Component for Greeting {
        fn el(&self) -> &Element {
            &self.base.el
        }

        fn render(&mut self) {
            RENDERS.fetch_add(1, Ordering::SeqCst);
            let name = self
                .base
                .props
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("nobody");
            self.base.el.set_text(format!("hello {name}"));
        }
    }

    #[test]
    fn base_defaults_to_div() {
        let base = ComponentBase::default();
        assert_eq!(base.el.tag(), "div");
        assert!(base.props.is_empty());
        assert!(base.state.is_empty());
    }

    #[test]
    fn factory_renders_once_per_build() {
        let factory = ComponentFactory::new(|| {
            let mut props = Map::new();
            props.insert("name".into(), Value::from("ada"));
            Greeting {
                base: ComponentBase::new(ComponentPayload {
                    tag_name: Some("p".into()),
                    props,
                    ..ComponentPayload::default()
                }),
            }
        });

        let before = RENDERS.load(Ordering::SeqCst);
        let component = factory.build();
        assert_eq!(RENDERS.load(Ordering::SeqCst), before + 1);
        assert_eq!(component.el().to_html(), "<p>hello ada</p>");
    }
}
