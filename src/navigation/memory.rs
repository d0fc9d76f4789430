use super::{NavigationPort, PopStateListener};
use crate::router::QueryMap;
use std::sync::{Arc, Mutex, RwLock};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// One entry of the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub state: Option<QueryMap>,
}

impl HistoryEntry {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: None,
        }
    }
}

struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    scroll: (i32, i32),
}

impl History {
    fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    fn current_mut(&mut self) -> &mut HistoryEntry {
        &mut self.entries[self.cursor]
    }
}

/// Session history kept in memory.
///
/// Behaves like the browser's `location`/`history` pair: `push` adds an
/// entry silently, while `back`, `forward`, `go` and `set_hash` fire
/// popstate listeners. Clones share the same history.
///
/// # Examples
///
/// ```
/// use hashnav::navigation::{MemoryNavigation, NavigationPort};
///
/// let nav = MemoryNavigation::new("/#/music?x=1");
/// assert_eq!(nav.hash(), "#/music?x=1");
///
/// nav.push("#/about");
/// assert_eq!(nav.url(), "/#/about");
/// assert!(nav.back());
/// assert_eq!(nav.hash(), "#/music?x=1");
/// ```
#[derive(Clone)]
pub struct MemoryNavigation {
    history: Arc<Mutex<History>>,
    listeners: Arc<RwLock<Vec<Listener>>>,
}

impl MemoryNavigation {
    /// Start with a single history entry at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            history: Arc::new(Mutex::new(History {
                entries: vec![HistoryEntry::new(url)],
                cursor: 0,
                scroll: (0, 0),
            })),
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// URL of the current entry.
    pub fn url(&self) -> String {
        self.history.lock().unwrap().current().url.clone()
    }

    /// State object of the current entry.
    pub fn state(&self) -> Option<QueryMap> {
        self.history.lock().unwrap().current().state.clone()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.history.lock().unwrap().entries.clone()
    }

    /// Number of history entries.
    pub fn len(&self) -> usize {
        self.history.lock().unwrap().entries.len()
    }

    /// Position of the current entry.
    pub fn index(&self) -> usize {
        self.history.lock().unwrap().cursor
    }

    pub fn scroll(&self) -> (i32, i32) {
        self.history.lock().unwrap().scroll
    }

    /// Number of registered popstate listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().unwrap().len()
    }

    /// Add a history entry without firing popstate.
    pub fn push(&self, url: &str) {
        let mut history = self.history.lock().unwrap();
        let resolved = resolve(&history.current().url, url);
        let next = history.cursor + 1;
        history.entries.truncate(next);
        history.entries.push(HistoryEntry::new(resolved));
        history.cursor = next;
    }

    /// Simulate the user editing the hash: a new entry, then popstate.
    pub fn set_hash(&self, hash: &str) {
        let hash = if hash.starts_with('#') {
            hash.to_string()
        } else {
            format!("#{hash}")
        };
        self.push(&hash);
        self.dispatch();
    }

    /// Move `delta` entries through history and fire popstate.
    ///
    /// Returns `false`, without firing, when the target is out of range.
    pub fn go(&self, delta: isize) -> bool {
        {
            let mut history = self.history.lock().unwrap();
            let target = match history.cursor.checked_add_signed(delta) {
                Some(target) if delta != 0 && target < history.entries.len() => target,
                _ => return false,
            };
            history.cursor = target;
        }
        self.dispatch();
        true
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    // Listeners run with no lock held: they typically call back into the port.
    fn dispatch(&self) {
        let listeners = self.listeners.read().unwrap().clone();
        tracing::trace!(count = listeners.len(), "dispatching popstate");
        for listener in listeners {
            listener();
        }
    }
}

impl NavigationPort for MemoryNavigation {
    fn hash(&self) -> String {
        fragment(&self.history.lock().unwrap().current().url).to_string()
    }

    fn replace_url(&self, url: &str) {
        let mut history = self.history.lock().unwrap();
        let resolved = resolve(&history.current().url, url);
        history.current_mut().url = resolved;
    }

    fn replace_state(&self, state: &QueryMap) {
        self.history.lock().unwrap().current_mut().state = Some(state.clone());
    }

    fn on_pop_state(&self, listener: PopStateListener) {
        self.listeners.write().unwrap().push(Arc::from(listener));
    }

    fn scroll_to(&self, x: i32, y: i32) {
        self.history.lock().unwrap().scroll = (x, y);
    }
}

/// The hash of `url`, empty when there is none or it is a bare `#`.
fn fragment(url: &str) -> &str {
    match url.find('#') {
        Some(start) if start + 1 < url.len() => &url[start..],
        _ => "",
    }
}

/// Resolve `url` against `base` the way a fragment-only link does.
fn resolve(base: &str, url: &str) -> String {
    if url.starts_with('#') {
        let path = base.split('#').next().unwrap_or_default();
        format!("{path}{url}")
    } else {
        url.to_string()
    }
}
