// ============================================================================
// NAVIGATOR - "ruta actual" + "push a ruta"
// ============================================================================
// Rutas del área protegida: history.pushState (sin recargar).
// Rutas externas (sign-in, etc.): navegación completa con location.assign.
// ============================================================================

#[cfg(test)]
use std::cell::RefCell;

use wasm_bindgen::JsValue;

use crate::config::RouteConfig;

pub trait Navigator {
    fn current_path(&self) -> String;
    fn push(&self, path: &str);
}

pub struct BrowserNavigator {
    routes: RouteConfig,
}

impl BrowserNavigator {
    pub fn new(routes: RouteConfig) -> Self {
        Self { routes }
    }

    fn assign(&self, path: &str) {
        let result = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No window"))
            .and_then(|w| w.location().assign(path));
        if let Err(e) = result {
            log::error!("❌ [NAV] No se pudo navegar a {}: {:?}", path, e);
        }
    }
}

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn push(&self, path: &str) {
        if !self.routes.is_protected(path) {
            log::info!("↪️ [NAV] Ruta externa, navegación completa a {}", path);
            self.assign(path);
            return;
        }

        let pushed = web_sys::window()
            .and_then(|w| w.history().ok())
            .map(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));

        match pushed {
            Some(Ok(())) => log::info!("🧭 [NAV] pushState {}", path),
            _ => {
                log::warn!("⚠️ [NAV] pushState falló, usando location.assign({})", path);
                self.assign(path);
            }
        }
    }
}

/// Navigator en memoria: registra cada push (tests)
#[cfg(test)]
pub struct MemoryNavigator {
    path: RefCell<String>,
    pushes: RefCell<Vec<String>>,
}

#[cfg(test)]
impl MemoryNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: RefCell::new(path.to_string()),
            pushes: RefCell::new(Vec::new()),
        }
    }

    pub fn pushes(&self) -> Vec<String> {
        self.pushes.borrow().clone()
    }

    /// Cambiar la ruta sin contar como push (p.ej. botón "atrás")
    pub fn set_path(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
    }
}

#[cfg(test)]
impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn push(&self, path: &str) {
        self.set_path(path);
        self.pushes.borrow_mut().push(path.to_string());
    }
}
