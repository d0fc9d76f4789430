use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

type Observer<V> = Arc<dyn Fn(&V) + Send + Sync>;

struct Slot<V> {
    value: V,
    reactive: bool,
}

/// A reactive key/value store with per-key change notification.
///
/// Every key present in the initial state is *reactive*: writing it through
/// [`Store::set`] or [`Store::update`] invokes the callbacks registered for
/// that key with [`Store::subscribe`], synchronously and in registration
/// order. Keys first written after construction are stored as plain values
/// and never notify anyone.
///
/// Clones share the same value and observer tables.
///
/// # Examples
///
/// ```
/// use hashnav::Store;
/// use std::sync::{Arc, Mutex};
///
/// let store = Store::new([("message", String::from("hello"))]);
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let seen_clone = seen.clone();
/// store.subscribe("message", move |value: &String| {
///     seen_clone.lock().unwrap().push(value.clone());
/// });
///
/// store.set("message", String::from("world"));
/// assert_eq!(store.get("message").as_deref(), Some("world"));
/// assert_eq!(*seen.lock().unwrap(), vec![String::from("world")]);
/// ```
pub struct Store<V> {
    values: Arc<RwLock<HashMap<String, Slot<V>>>>,
    observers: Arc<RwLock<HashMap<String, Vec<Observer<V>>>>>,
}

impl<V: Clone> Store<V> {
    /// Create a store whose reactive keys are exactly the keys of `initial`.
    pub fn new<I, K>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let values = initial
            .into_iter()
            .map(|(key, value)| {
                (
                    key.into(),
                    Slot {
                        value,
                        reactive: true,
                    },
                )
            })
            .collect();

        Self {
            values: Arc::new(RwLock::new(values)),
            observers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get a clone of the current value for `key`.
    pub fn get(&self, key: &str) -> Option<V> {
        self.values
            .read()
            .unwrap()
            .get(key)
            .map(|slot| slot.value.clone())
    }

    /// Read the value for `key` with a function.
    ///
    /// `f` receives a copy taken under the lock and runs after the lock is
    /// released, so it may read, write, or subscribe on this store. Writes
    /// made inside `f` are not reflected in the value it was handed.
    pub fn with<R>(&self, key: &str, f: impl FnOnce(Option<&V>) -> R) -> R {
        let value = self.get(key);
        f(value.as_ref())
    }

    /// Write `value` under `key`.
    ///
    /// For reactive keys every subscriber is called with the new value before
    /// this returns. Writing an unknown key stores it as a plain value.
    pub fn set(&self, key: &str, value: V) {
        let reactive = {
            let mut values = self.values.write().unwrap();
            match values.get_mut(key) {
                Some(slot) => {
                    slot.value = value.clone();
                    slot.reactive
                }
                None => {
                    values.insert(
                        key.to_string(),
                        Slot {
                            value: value.clone(),
                            reactive: false,
                        },
                    );
                    false
                }
            }
        };

        if reactive {
            self.notify(key, &value);
        } else {
            tracing::trace!(key, "write to non-reactive key, observers skipped");
        }
    }

    /// Update the value under `key` through a function.
    ///
    /// `f` edits a copy with no lock held and the result is written back
    /// afterwards, so `f` may use the store; a write it makes to `key` itself
    /// is overwritten. Returns `false` without calling `f` when the key does
    /// not exist.
    pub fn update<F>(&self, key: &str, f: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        let (mut value, reactive) = match self.values.read().unwrap().get(key) {
            Some(slot) => (slot.value.clone(), slot.reactive),
            None => return false,
        };

        f(&mut value);

        let updated = {
            let mut values = self.values.write().unwrap();
            values.get_mut(key).map(|slot| {
                slot.value = value.clone();
                (value, reactive)
            })
        };

        match updated {
            Some((value, true)) => {
                self.notify(key, &value);
                true
            }
            Some((_, false)) => true,
            None => false,
        }
    }

    /// Subscribe to changes of `key`.
    ///
    /// Callbacks live as long as the store; there is no way to remove one.
    pub fn subscribe<F>(&self, key: &str, callback: F)
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        if !self.is_reactive(key) {
            tracing::debug!(key, "subscribed to a key that is not reactive");
        }
        self.observers
            .write()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Whether `key` was part of the initial state.
    pub fn is_reactive(&self, key: &str) -> bool {
        self.values
            .read()
            .unwrap()
            .get(key)
            .is_some_and(|slot| slot.reactive)
    }

    /// Number of callbacks registered for `key`.
    pub fn subscriber_count(&self, key: &str) -> usize {
        self.observers
            .read()
            .unwrap()
            .get(key)
            .map_or(0, Vec::len)
    }

    /// The reactive keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .values
            .read()
            .unwrap()
            .iter()
            .filter(|(_, slot)| slot.reactive)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Copy of every value currently held, reactive or not.
    pub fn snapshot(&self) -> BTreeMap<String, V> {
        self.values
            .read()
            .unwrap()
            .iter()
            .map(|(key, slot)| (key.clone(), slot.value.clone()))
            .collect()
    }

    // The observer list is cloned out so callbacks run with no lock held and
    // may read, write, or subscribe on this store.
    fn notify(&self, key: &str, value: &V) {
        let observers = match self.observers.read().unwrap().get(key) {
            Some(list) => list.clone(),
            None => return,
        };

        tracing::trace!(key, count = observers.len(), "notifying observers");
        for observer in observers {
            observer(value);
        }
    }
}

impl<V> Clone for Store<V> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
            observers: Arc::clone(&self.observers),
        }
    }
}
