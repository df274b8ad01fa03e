// ============================================================================
// BROWSER SESSION STORE - localStorage + evento `storage` de window
// ============================================================================
// El evento `storage` solo llega a las OTRAS pestañas/ventanas del mismo
// origen; las escrituras de esta pestaña no lo disparan.
// ============================================================================

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, StorageEvent};

use crate::dom::WindowListener;
use crate::services::session_store::{
    SessionError, SessionStore, SessionWriter, StorageChange, Subscription,
};
use crate::utils::storage::get_local_storage;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    pub fn new() -> Self {
        Self
    }
}

/// Convertir el evento del navegador; ignora cambios de sessionStorage
fn storage_change_from_event(event: &Event) -> Option<StorageChange> {
    let event = event.dyn_ref::<StorageEvent>()?;

    if let (Some(area), Some(local)) = (event.storage_area(), get_local_storage()) {
        let area: &JsValue = area.as_ref();
        let local: &JsValue = local.as_ref();
        if area != local {
            return None;
        }
    }

    Some(StorageChange { key: event.key() })
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn subscribe(&self, key: &str, callback: Box<dyn Fn(&StorageChange)>) -> Subscription {
        let watched = key.to_string();
        let listener = WindowListener::new("storage", move |event: Event| {
            if let Some(change) = storage_change_from_event(&event) {
                if change.concerns(&watched) {
                    callback(&change);
                }
            }
        });

        match listener {
            Ok(listener) => {
                log::info!("👂 [STORAGE] Listener 'storage' registrado para '{}'", key);
                let key = key.to_string();
                Subscription::new(move || {
                    drop(listener);
                    log::info!("🔌 [STORAGE] Listener 'storage' eliminado para '{}'", key);
                })
            }
            Err(e) => {
                log::warn!("⚠️ [STORAGE] No se pudo escuchar cambios de '{}': {:?}", key, e);
                Subscription::noop()
            }
        }
    }
}

impl SessionWriter for BrowserSessionStore {
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let storage = get_local_storage().ok_or(SessionError::StorageUnavailable)?;
        storage.set_item(key, value).map_err(|e| SessionError::StorageWrite {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let storage = get_local_storage().ok_or(SessionError::StorageUnavailable)?;
        storage.remove_item(key).map_err(|e| SessionError::StorageWrite {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}
