use serde::de::DeserializeOwned;
use web_sys::{window, Storage};

use crate::services::session_store::SessionStore;

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Leer y deserializar un valor JSON del store.
/// Ausente o mal formado => `None` (nunca propaga el error de parseo).
pub fn load_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: SessionStore + ?Sized,
    T: DeserializeOwned,
{
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] '{}' no es JSON válido, se ignora: {}", key, e);
            None
        }
    }
}
