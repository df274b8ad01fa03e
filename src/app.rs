// ============================================================================
// APP - Aplicación principal (shell del dashboard)
// ============================================================================
// Las decisiones (montar/desmontar guard, qué renderizar) viven en
// `ShellViewModel`; aquí solo se aplica el resultado sobre `#app`.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::services::{BrowserNavigator, BrowserSessionStore};
use crate::utils::constants::APP_ROOT_ID;
use crate::viewmodels::{GuardSettings, ShellRender, ShellViewModel};
use crate::views::{render_checking, render_dashboard, DashboardContext};

pub struct App {
    root: Element,
    shell: ShellViewModel<BrowserSessionStore, BrowserNavigator>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let shell = ShellViewModel::new(
            Rc::new(BrowserSessionStore::new()),
            Rc::new(BrowserNavigator::new(CONFIG.routes.clone())),
            GuardSettings::from_config(&CONFIG),
            &CONFIG.privileged_role,
            |_phase| crate::schedule_guard_sync(),
        );

        Ok(Self { root, shell })
    }

    /// Resolver la ruta actual (carga inicial, popstate, links internos)
    pub fn route(&mut self) -> Result<(), JsValue> {
        let render = self.shell.route();
        self.apply(render)
    }

    /// Navegación interna sin recargar
    pub fn navigate(&mut self, path: &str) -> Result<(), JsValue> {
        let render = self.shell.navigate(path);
        self.apply(render)
    }

    /// Re-sincronizar tras un cambio de fase del guard (p.ej. evento `storage`)
    pub fn sync_with_guard(&mut self) -> Result<(), JsValue> {
        let render = self.shell.sync_with_guard();
        self.apply(render)
    }

    /// Sign-out en esta pestaña: borrar sesión y salir del área protegida
    pub fn sign_out(&mut self) -> Result<(), JsValue> {
        let render = self.shell.sign_out()?;
        self.apply(render)
    }

    fn apply(&self, render: ShellRender) -> Result<(), JsValue> {
        match render {
            ShellRender::Unchanged => Ok(()),
            ShellRender::Clear => {
                clear_children(&self.root);
                Ok(())
            }
            ShellRender::Checking => {
                clear_children(&self.root);
                append_child(&self.root, &render_checking()?)
            }
            ShellRender::Dashboard(state) => {
                let ctx = DashboardContext {
                    routes: &CONFIG.routes,
                    path: &state.path,
                    section: state.section,
                    profile: state.profile,
                    privileged: state.privileged,
                };
                let view = render_dashboard(&ctx)?;
                clear_children(&self.root);
                append_child(&self.root, &view)
            }
        }
    }
}
