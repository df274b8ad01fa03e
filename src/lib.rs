// ============================================================================
// T-COIN ADMIN - SHELL DEL DASHBOARD (RUST PURO + MVVM)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Session guard + flag de rol
// - Services: localStorage, navegación, persistencia de sesión
// - State: Estado reactivo con Rc<RefCell>
// - Models: Perfil de usuario y secciones del dashboard
// Las páginas CRUD y el sign-in son externos; usan las funciones exportadas.
// ============================================================================

mod app;
pub mod config;
mod dom;
pub mod models;
pub mod services;
mod state;
mod utils;
pub mod viewmodels;
mod views;

use std::cell::{Cell, RefCell};

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;
use crate::services::{auth_service, BrowserSessionStore};

// Instancia global de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    static GUARD_SYNC_PENDING: Cell<bool> = Cell::new(false);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 T-Coin Admin - Rust Puro + MVVM ({})", CONFIG.environment);

    let mut app = App::new()?;
    app.route()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Back/forward del navegador. Se registra UNA VEZ aquí.
    dom::on_window_forever("popstate", |_e: web_sys::Event| {
        log::info!("🔙 [MAIN] popstate, re-enrutando");
        reroute_app();
    })?;

    Ok(())
}

fn with_app<F>(action: &str, f: F)
where
    F: FnOnce(&mut App) -> Result<(), JsValue>,
{
    APP.with(|app_cell| match app_cell.try_borrow_mut() {
        Ok(mut app) => match app.as_mut() {
            Some(app) => {
                if let Err(e) = f(app) {
                    log::error!("❌ [MAIN] Error en {}: {:?}", action, e);
                }
            }
            None => log::warn!("⚠️ [MAIN] App no está inicializada ({})", action),
        },
        Err(_) => log::error!("❌ [MAIN] App ocupada, {} descartado", action),
    });
}

/// Navegación interna (links del sidebar)
pub fn navigate_to(path: &str) {
    with_app("navigate", |app| app.navigate(path));
}

/// Botón de sign-out del header
pub fn sign_out_and_redirect() {
    with_app("sign_out", |app| app.sign_out());
}

/// Programar una re-sincronización con el guard en el próximo turno del
/// event loop. Varias llamadas seguidas se agrupan en una sola.
pub fn schedule_guard_sync() {
    if GUARD_SYNC_PENDING.with(|pending| pending.replace(true)) {
        return;
    }
    Timeout::new(0, || {
        GUARD_SYNC_PENDING.with(|pending| pending.set(false));
        with_app("guard_sync", |app| app.sync_with_guard());
    })
    .forget();
}

/// Re-evaluar la ruta actual (llamable desde JavaScript)
#[wasm_bindgen]
pub fn reroute_app() {
    with_app("reroute", |app| app.route());
}

/// Llamado por la página de sign-in externa tras autenticar contra el API
#[wasm_bindgen]
pub fn complete_sign_in(token: String, user_json: Option<String>) -> Result<(), JsValue> {
    let store = BrowserSessionStore::new();
    auth_service::persist_sign_in(&store, &token, user_json.as_deref())?;
    Ok(())
}

/// Sign-out desde JavaScript (páginas externas)
#[wasm_bindgen]
pub fn sign_out() {
    sign_out_and_redirect();
}

/// Flag de rol para las páginas CRUD externas
#[wasm_bindgen]
pub fn is_privileged_user() -> bool {
    viewmodels::get_role_flag(&BrowserSessionStore::new(), &CONFIG.privileged_role)
}

/// URL del API para las páginas externas
#[wasm_bindgen]
pub fn api_url() -> String {
    CONFIG.api_url().to_string()
}
