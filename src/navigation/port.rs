use crate::component::Element;
use crate::router::QueryMap;

/// Callback invoked on back/forward navigation.
pub type PopStateListener = Box<dyn Fn() + Send + Sync>;

/// The slice of the browser's location/history API the router consumes.
pub trait NavigationPort: Send + Sync {
    /// Current hash fragment including the leading `#`, or empty.
    fn hash(&self) -> String;

    /// Replace the current history entry's URL without adding an entry.
    fn replace_url(&self, url: &str);

    /// Replace the current history entry's state, keeping its URL.
    fn replace_state(&self, state: &QueryMap);

    /// Register a listener for back/forward navigation.
    fn on_pop_state(&self, listener: PopStateListener);

    fn scroll_to(&self, x: i32, y: i32);
}

/// The element the router mounts matched components into.
pub trait MountTarget: Send + Sync {
    fn clear(&self);

    fn append(&self, element: Element);
}
