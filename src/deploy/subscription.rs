use std::hash::Hash;
use std::sync::Arc;

use crate::store::{Listener, ListenerId, Store};

/// Keeps a view registered on at most one entry of one store.
///
/// [`Subscription::set_key`] is the single place registrations are diffed
/// and migrated: structurally equal keys are a no-op, anything else
/// deregisters the old entry and registers the new one. Dropping the
/// subscription deregisters too, so a missed unmount cannot leak a listener.
pub struct Subscription<K, S>
where
    K: Clone + Eq + Hash,
    S: Clone + Default,
{
    store: Arc<Store<K, S>>,
    active: Option<(K, ListenerId)>,
}

impl<K, S> Subscription<K, S>
where
    K: Clone + Eq + Hash,
    S: Clone + Default,
{
    pub fn new(store: Arc<Store<K, S>>) -> Self {
        Self {
            store,
            active: None,
        }
    }

    /// Key currently registered, if any.
    pub fn key(&self) -> Option<&K> {
        self.active.as_ref().map(|(key, _)| key)
    }

    /// Re-point the registration at `key`.
    ///
    /// Returns true when the registration actually changed (a listener was
    /// added, removed, or moved); callers use this to decide whether an
    /// immediate recomputation is needed.
    pub fn set_key(&mut self, key: Option<&K>, listener: &Listener) -> bool {
        if self.key() == key {
            return false;
        }
        if let Some((old_key, id)) = self.active.take() {
            self.store.remove_change_listener(&old_key, id);
        }
        if let Some(new_key) = key {
            let id = self
                .store
                .add_change_listener(new_key, Arc::clone(listener));
            self.active = Some((new_key.clone(), id));
        }
        true
    }

    /// Deregister, if registered.
    pub fn clear(&mut self) {
        if let Some((key, id)) = self.active.take() {
            self.store.remove_change_listener(&key, id);
        }
    }
}

impl<K, S> Drop for Subscription<K, S>
where
    K: Clone + Eq + Hash,
    S: Clone + Default,
{
    fn drop(&mut self) {
        self.clear();
    }
}
