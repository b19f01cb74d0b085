// Keyed, subscribable snapshot stores shared between the engine layer
// (single writer) and the UI layer (many readers). Views never write here;
// everything they trigger goes through the engine, which writes back.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub mod commit;
pub mod job_output;

pub use commit::{CommitState, CommitStore};
pub use job_output::{JobOutputState, JobOutputStore};

/// Change-notification callback registered on a store entry.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Token identifying one registration, returned by
/// [`Store::add_change_listener`] and consumed by
/// [`Store::remove_change_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// A read-accessible, subscribable cache of externally-sourced data keyed by
/// structured identifiers.
///
/// Lookups for keys nobody has written yet return the default ("empty")
/// snapshot; absence is a normal state, not an error.
pub struct Store<K, S> {
    inner: Mutex<Inner<K, S>>,
    next_listener_id: AtomicU64,
}

struct Inner<K, S> {
    snapshots: HashMap<K, S>,
    listeners: HashMap<K, Vec<(ListenerId, Listener)>>,
}

impl<K, S> Store<K, S>
where
    K: Clone + Eq + Hash,
    S: Clone + Default,
{
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                snapshots: HashMap::new(),
                listeners: HashMap::new(),
            }),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// Current snapshot for `key`, or the empty snapshot if none exists.
    pub fn get_state(&self, key: &K) -> S {
        let inner = self.inner.lock().expect("store mutex");
        inner.snapshots.get(key).cloned().unwrap_or_default()
    }

    /// Register `listener` for change notifications on `key`.
    pub fn add_change_listener(&self, key: &K, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        let mut inner = self.inner.lock().expect("store mutex");
        inner
            .listeners
            .entry(key.clone())
            .or_default()
            .push((id, listener));
        id
    }

    /// Drop the registration `id` made on `key`. Unknown ids are ignored.
    pub fn remove_change_listener(&self, key: &K, id: ListenerId) {
        let mut inner = self.inner.lock().expect("store mutex");
        if let Some(entries) = inner.listeners.get_mut(key) {
            entries.retain(|(entry_id, _)| *entry_id != id);
            if entries.is_empty() {
                inner.listeners.remove(key);
            }
        }
    }

    /// Mutate the snapshot for `key`, then notify that key's listeners.
    ///
    /// Listeners run after the lock is released so they may re-read the
    /// store from inside the notification.
    pub fn update(&self, key: &K, apply: impl FnOnce(&mut S)) {
        let to_notify: Vec<Listener> = {
            let mut inner = self.inner.lock().expect("store mutex");
            apply(inner.snapshots.entry(key.clone()).or_default());
            inner
                .listeners
                .get(key)
                .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
                .unwrap_or_default()
        };
        for listener in to_notify {
            listener();
        }
    }

    /// Number of live registrations on `key`.
    pub fn listener_count(&self, key: &K) -> usize {
        let inner = self.inner.lock().expect("store mutex");
        inner.listeners.get(key).map_or(0, Vec::len)
    }
}

impl<K, S> Default for Store<K, S>
where
    K: Clone + Eq + Hash,
    S: Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
