// ============================================================================
// MEMORY SESSION STORE - Store en memoria (solo tests)
// ============================================================================
// Mismo contrato que el navegador:
// - `set` / `remove` (misma pestaña) NO notifican a los suscriptores
// - `external_*` simulan otra pestaña y SÍ notifican
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::services::session_store::{
    SessionError, SessionStore, SessionWriter, StorageChange, Subscription,
};

type ChangeCallback = Rc<dyn Fn(&StorageChange)>;

struct Listener {
    id: u64,
    key: String,
    callback: ChangeCallback,
}

#[derive(Default)]
struct MemoryInner {
    entries: RefCell<HashMap<String, String>>,
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
}

/// Handle clonable: todos los clones comparten el mismo storage
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Rc<MemoryInner>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let store = Self::new();
        {
            let mut map = store.inner.entries.borrow_mut();
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Otra pestaña escribe `key`
    pub fn external_set(&self, key: &str, value: &str) {
        self.inner
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.notify(&StorageChange::updated(key));
    }

    /// Otra pestaña elimina `key`
    pub fn external_remove(&self, key: &str) {
        self.inner.entries.borrow_mut().remove(key);
        self.notify(&StorageChange::updated(key));
    }

    /// Otra pestaña ejecuta `localStorage.clear()`
    pub fn external_clear(&self) {
        self.inner.entries.borrow_mut().clear();
        self.notify(&StorageChange::cleared());
    }

    /// Listeners vivos (para verificar que no hay fugas)
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self, change: &StorageChange) {
        // Copiar callbacks antes de invocar: un callback puede (des)suscribir
        let callbacks: Vec<ChangeCallback> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|listener| change.concerns(&listener.key))
            .map(|listener| listener.callback.clone())
            .collect();

        for callback in callbacks {
            callback(change);
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.entries.borrow().get(key).cloned()
    }

    fn subscribe(&self, key: &str, callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push(Listener {
            id,
            key: key.to_string(),
            callback: Rc::from(callback),
        });

        let inner: Weak<MemoryInner> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().retain(|listener| listener.id != id);
            }
        })
    }
}

impl SessionWriter for MemorySessionStore {
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.inner
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.inner.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<StorageChange>>>, Box<dyn Fn(&StorageChange)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Box::new(move |change: &StorageChange| sink.borrow_mut().push(change.clone())))
    }

    #[test]
    fn external_changes_reach_matching_subscribers_only() {
        let store = MemorySessionStore::new();
        let (seen, callback) = recorder();
        let _sub = store.subscribe("authToken", callback);

        store.external_set("user", r#"{"type":"agent"}"#);
        store.external_set("authToken", "abc");
        store.external_remove("authToken");

        assert_eq!(
            *seen.borrow(),
            vec![
                StorageChange::updated("authToken"),
                StorageChange::updated("authToken"),
            ]
        );
        assert_eq!(store.get("user").as_deref(), Some(r#"{"type":"agent"}"#));
        assert_eq!(store.get("authToken"), None);
    }

    #[test]
    fn full_clear_notifies_every_subscriber() {
        let store = MemorySessionStore::with_entries([("authToken", "abc"), ("user", "{}")]);
        let (seen, callback) = recorder();
        let _sub = store.subscribe("authToken", callback);

        store.external_clear();

        assert_eq!(*seen.borrow(), vec![StorageChange::cleared()]);
        assert_eq!(store.get("authToken"), None);
        assert_eq!(store.get("user"), None);
    }

    #[test]
    fn same_tab_writes_do_not_notify() {
        let store = MemorySessionStore::new();
        let (seen, callback) = recorder();
        let _sub = store.subscribe("authToken", callback);

        store.set("authToken", "abc").unwrap();
        assert_eq!(store.get("authToken").as_deref(), Some("abc"));
        store.remove("authToken").unwrap();
        assert_eq!(store.get("authToken"), None);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn dropping_subscription_detaches_listener() {
        let store = MemorySessionStore::new();
        let (seen, callback) = recorder();
        let sub = store.subscribe("authToken", callback);
        assert_eq!(store.listener_count(), 1);

        drop(sub);
        assert_eq!(store.listener_count(), 0);

        store.external_remove("authToken");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clones_share_entries_and_listeners() {
        let store = MemorySessionStore::new();
        let other_handle = store.clone();
        let (seen, callback) = recorder();
        let _sub = store.subscribe("authToken", callback);

        other_handle.external_set("authToken", "xyz");

        assert_eq!(store.get("authToken").as_deref(), Some("xyz"));
        assert_eq!(seen.borrow().len(), 1);
    }
}
