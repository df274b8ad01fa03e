// ============================================================================
// SESSION STORE - Abstracción del estado persistido (localStorage)
// ============================================================================
// El guard solo depende de `SessionStore` (lectura + suscripción).
// La escritura vive en `SessionWriter` y la usan sign-in / sign-out.
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Cambio observado en el storage desde otro contexto de navegación.
/// `key == None` => se vació todo el storage (`localStorage.clear()`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: Option<String>,
}

impl StorageChange {
    #[cfg(test)]
    pub fn updated(key: &str) -> Self {
        Self { key: Some(key.to_string()) }
    }

    #[cfg(test)]
    pub fn cleared() -> Self {
        Self { key: None }
    }

    /// ¿Afecta este cambio a `key`?
    pub fn concerns(&self, key: &str) -> bool {
        self.key.as_deref().map_or(true, |k| k == key)
    }
}

/// Suscripción activa a cambios del storage.
/// Al hacer drop se libera el listener (una sola vez).
#[must_use = "la suscripción se libera al hacer drop"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self { release: Some(Box::new(release)) }
    }

    /// Suscripción sin listener real (storage no disponible)
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Lectura del estado persistido + aviso de cambios externos
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Registrar `callback` para cambios de `key` hechos en otra pestaña/ventana
    fn subscribe(&self, key: &str, callback: Box<dyn Fn(&StorageChange)>) -> Subscription;
}

/// Escritura del estado persistido (nunca la usa el guard)
pub trait SessionWriter: SessionStore {
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("localStorage no disponible")]
    StorageUnavailable,
    #[error("error escribiendo '{key}' en localStorage: {reason}")]
    StorageWrite { key: String, reason: String },
    #[error("token de sesión vacío")]
    EmptyToken,
}

impl From<SessionError> for JsValue {
    fn from(error: SessionError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
