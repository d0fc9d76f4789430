use super::route::{MountDecision, RouteTable};
use crate::navigation::{MountTarget, NavigationPort};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Whether a render pass is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Rendering,
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// URL written over an empty hash, without adding a history entry.
    pub default_url: String,
    /// Scroll position restored after every render.
    pub scroll_origin: (i32, i32),
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            default_url: "/#/".to_string(),
            scroll_origin: (0, 0),
        }
    }
}

impl RouterOptions {
    pub fn default_url(mut self, url: impl Into<String>) -> Self {
        self.default_url = url.into();
        self
    }

    pub fn scroll_origin(mut self, x: i32, y: i32) -> Self {
        self.scroll_origin = (x, y);
        self
    }
}

struct RouterInner<P, V> {
    routes: RouteTable,
    port: P,
    view: V,
    options: RouterOptions,
    started: AtomicBool,
    depth: AtomicUsize,
}

struct DepthGuard<'a>(&'a AtomicUsize);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<P: NavigationPort, V: MountTarget> RouterInner<P, V> {
    fn render(&self) -> MountDecision {
        let depth = self.depth.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = DepthGuard(&self.depth);
        if depth > 1 {
            // Not blocked: a component or listener navigated mid-render.
            tracing::debug!(depth, "re-entrant render");
        }

        let mut hash = self.port.hash();
        if hash.is_empty() {
            tracing::debug!(url = %self.options.default_url, "empty hash, replacing url");
            self.port.replace_url(&self.options.default_url);
            hash = self.port.hash();
        }

        let decision = self.routes.resolve(&hash);
        self.port.replace_state(&decision.query);

        self.view.clear();
        match decision.route.and_then(|index| self.routes.get(index)) {
            Some(route) => {
                tracing::debug!(%hash, route = route.pattern(), "mounting route");
                let component = route.component().build();
                self.view.append(component.el().clone());
            }
            None => tracing::warn!(%hash, "no route matched, view left empty"),
        }

        let (x, y) = self.options.scroll_origin;
        self.port.scroll_to(x, y);

        decision
    }
}

/// Hash-fragment router.
///
/// Holds an ordered [`RouteTable`], a [`NavigationPort`] and the
/// [`MountTarget`] it renders into. Renders once on [`Router::start`] and
/// again on every popstate the port reports. URL changes that do not fire
/// popstate, such as a programmatic history push, do not re-render.
///
/// Clones share the same router.
///
/// # Examples
///
/// ```
/// use hashnav::component::{Component, Element};
/// use hashnav::navigation::{MemoryNavigation, NavigationPort, RouterView};
/// use hashnav::{Route, RouteTable, Router};
///
/// struct Page(Element);
///
/// impl Component for Page {
///     fn el(&self) -> &Element {
///         &self.0
///     }
/// }
///
/// let routes = RouteTable::new(vec![
///     Route::new("#/", || Page(Element::new("main"))).unwrap(),
///     Route::new(".*", || Page(Element::new("aside"))).unwrap(),
/// ]);
/// let nav = MemoryNavigation::new("/");
/// let view = RouterView::new();
///
/// let router = Router::new(routes, nav.clone(), view.clone());
/// router.start();
///
/// assert_eq!(nav.hash(), "#/");
/// assert_eq!(view.children()[0].tag(), "main");
/// ```
pub struct Router<P, V> {
    inner: Arc<RouterInner<P, V>>,
}

impl<P, V> Router<P, V>
where
    P: NavigationPort + 'static,
    V: MountTarget + 'static,
{
    pub fn new(routes: RouteTable, port: P, view: V) -> Self {
        Self::with_options(routes, port, view, RouterOptions::default())
    }

    pub fn with_options(routes: RouteTable, port: P, view: V, options: RouterOptions) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                routes,
                port,
                view,
                options,
                started: AtomicBool::new(false),
                depth: AtomicUsize::new(0),
            }),
        }
    }

    /// Register the popstate listener and render the current URL.
    ///
    /// Only the first call has an effect; it returns `true`.
    pub fn start(&self) -> bool {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return false;
        }

        let router = Arc::downgrade(&self.inner);
        self.inner.port.on_pop_state(Box::new(move || {
            if let Some(router) = router.upgrade() {
                router.render();
            }
        }));

        tracing::debug!(routes = self.inner.routes.len(), "router started");
        self.inner.render();
        true
    }

    /// Run one full render pass and return what was mounted.
    pub fn render(&self) -> MountDecision {
        self.inner.render()
    }

    pub fn state(&self) -> RouterState {
        if self.inner.depth.load(Ordering::SeqCst) > 0 {
            RouterState::Rendering
        } else {
            RouterState::Idle
        }
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.load(Ordering::SeqCst)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    pub fn options(&self) -> &RouterOptions {
        &self.inner.options
    }
}

impl<P, V> Clone for Router<P, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, Element};
    use crate::navigation::{MemoryNavigation, RouterView};
    use crate::router::Route;
    use std::sync::Mutex;

    struct Page(Element);

    impl Component for Page {
        fn el(&self) -> &Element {
            &self.0
        }
    }

    fn page(name: &'static str) -> impl Fn() -> Page + Send + Sync + 'static {
        move || Page(Element::new("div").with_text(name))
    }

    fn routes() -> RouteTable {
        RouteTable::new(vec![
            Route::new("#/", page("home")).unwrap(),
            Route::new("#/music", page("music")).unwrap(),
            Route::new("#/about", page("about")).unwrap(),
            Route::new(".*", page("not found")).unwrap(),
        ])
    }

    fn mounted(view: &RouterView) -> Vec<String> {
        view.children()
            .iter()
            .filter_map(|el| el.text().map(str::to_string))
            .collect()
    }

    #[test]
    fn start_is_idempotent() {
        let nav = MemoryNavigation::new("/#/about");
        let view = RouterView::new();
        let router = Router::new(routes(), nav.clone(), view.clone());

        assert!(!router.is_started());
        assert!(router.start());
        assert!(!router.start());
        assert_eq!(nav.listener_count(), 1);
        assert_eq!(mounted(&view), vec!["about"]);
    }

    #[test]
    fn render_replaces_previous_mount() {
        let nav = MemoryNavigation::new("/#/music");
        let view = RouterView::new();
        let router = Router::new(routes(), nav.clone(), view.clone());
        router.start();

        nav.set_hash("#/about");
        assert_eq!(mounted(&view), vec!["about"]);
    }

    #[test]
    fn push_does_not_render() {
        let nav = MemoryNavigation::new("/#/music");
        let view = RouterView::new();
        let router = Router::new(routes(), nav.clone(), view.clone());
        router.start();

        nav.push("#/about");
        assert_eq!(mounted(&view), vec!["music"]);

        router.render();
        assert_eq!(mounted(&view), vec!["about"]);
    }

    #[test]
    fn custom_options_apply() {
        let nav = MemoryNavigation::new("/app");
        let view = RouterView::new();
        let options = RouterOptions::default()
            .default_url("#/about")
            .scroll_origin(0, 10);
        let router = Router::with_options(routes(), nav.clone(), view.clone(), options);
        router.start();

        assert_eq!(nav.url(), "/app#/about");
        assert_eq!(nav.scroll(), (0, 10));
        assert_eq!(mounted(&view), vec!["about"]);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: RouterOptions = serde_json::from_str(r#"{ "default_url": "/#/home" }"#).unwrap();
        assert_eq!(options.default_url, "/#/home");
        assert_eq!(options.scroll_origin, (0, 0));
    }

    #[test]
    fn state_is_rendering_only_during_a_pass() {
        let observed = Arc::new(Mutex::new(Vec::new()));
        let slot: Arc<Mutex<Option<Router<MemoryNavigation, RouterView>>>> =
            Arc::new(Mutex::new(None));

        let observed_clone = observed.clone();
        let slot_clone = slot.clone();
        let table = RouteTable::new(vec![Route::new(".*", move || {
            if let Some(router) = slot_clone.lock().unwrap().as_ref() {
                observed_clone.lock().unwrap().push(router.state());
            }
            Page(Element::new("div"))
        })
        .unwrap()]);

        let router = Router::new(table, MemoryNavigation::new("/#/"), RouterView::new());
        *slot.lock().unwrap() = Some(router.clone());

        assert_eq!(router.state(), RouterState::Idle);
        router.render();
        assert_eq!(router.state(), RouterState::Idle);
        assert_eq!(*observed.lock().unwrap(), vec![RouterState::Rendering]);

        slot.lock().unwrap().take();
    }

    #[test]
    fn dropped_router_ignores_popstate() {
        let nav = MemoryNavigation::new("/#/music");
        let view = RouterView::new();
        {
            let router = Router::new(routes(), nav.clone(), view.clone());
            router.start();
        }

        nav.set_hash("#/about");
        assert_eq!(mounted(&view), vec!["music"]);
    }
}
