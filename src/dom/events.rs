// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Listeners en elementos del DOM: al destruir el elemento (set_inner_html("")),
//   el navegador limpia sus listeners, así que closure.forget() es seguro.
// - Listeners en window con vida acotada (p.ej. `storage` de una vista
//   protegida): usar `WindowListener`, que se desregistra en Drop.
// - Listeners globales de toda la app (p.ej. `popstate`): registrar UNA VEZ
//   en init() y usar forget().
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, Window};

/// Listener sobre `window` que se elimina al hacer drop
pub struct WindowListener {
    window: Window,
    event_type: String,
    closure: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
    pub fn new<F>(event_type: &str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback(
            event_type,
            closure.as_ref().unchecked_ref(),
        )?;
        Ok(Self {
            window,
            event_type: event_type.to_string(),
            closure,
        })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        if let Err(e) = self.window.remove_event_listener_with_callback(
            &self.event_type,
            self.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("⚠️ [EVENTS] No se pudo eliminar listener '{}': {:?}", self.event_type, e);
        }
    }
}

/// Listener global de la app (se registra una vez y vive para siempre)
pub fn on_window_forever<F>(event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Helper para crear click handler simple
/// Nota: Cuando el elemento se destruye del DOM (p.ej. con set_inner_html("")),
/// el navegador automáticamente limpia los listeners, por lo que closure.forget() es seguro.
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback(
        "click",
        closure.as_ref().unchecked_ref(),
    )?;
    closure.forget();
    Ok(())
}
