// ============================================================================
// SHELL VIEWMODEL - Decisiones de ruta/fase del shell (sin DOM)
// ============================================================================
// - Ruta protegida: monta el guard una sola vez y re-verifica en cada cambio
// - Ruta pública: desmonta la vista protegida (libera el listener `storage`)
// - REDIRECTING: desmonta; ALLOWED: dashboard; resto: shell vacío
// La App ejecuta el `ShellRender` devuelto sobre el DOM.
// ============================================================================

use std::rc::Rc;

use crate::config::RouteConfig;
use crate::models::{DashboardSection, UserProfile};
use crate::services::auth_service;
use crate::services::navigator::Navigator;
use crate::services::session_store::{SessionError, SessionStore, SessionWriter};
use crate::viewmodels::role::{current_profile, get_role_flag};
use crate::viewmodels::session_guard::{GuardPhase, GuardSettings, ProtectedView, SessionGuard};

/// Datos para renderizar el dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub path: String,
    pub section: Option<DashboardSection>,
    pub profile: Option<UserProfile>,
    pub privileged: bool,
}

/// Qué debe hacer la App con el DOM
#[derive(Debug, Clone, PartialEq)]
pub enum ShellRender {
    /// Vaciar la raíz (ruta pública o redirección en curso)
    Clear,
    /// Shell vacío mientras el guard verifica
    Checking,
    Dashboard(DashboardState),
    /// Misma fase ya renderizada: no tocar el DOM (conserva `#page-slot`)
    Unchanged,
}

pub struct ShellViewModel<S, N> {
    store: Rc<S>,
    navigator: Rc<N>,
    routes: RouteConfig,
    privileged_role: String,
    guard: SessionGuard<S, N>,
    view: Option<ProtectedView<S, N>>,
    rendered_phase: Option<GuardPhase>,
    on_phase_change: Rc<dyn Fn(GuardPhase)>,
}

impl<S, N> ShellViewModel<S, N>
where
    S: SessionStore + 'static,
    N: Navigator + 'static,
{
    pub fn new<F>(
        store: Rc<S>,
        navigator: Rc<N>,
        settings: GuardSettings,
        privileged_role: &str,
        on_phase_change: F,
    ) -> Self
    where
        F: Fn(GuardPhase) + 'static,
    {
        let routes = settings.routes.clone();
        let guard = SessionGuard::new(store.clone(), navigator.clone(), settings);
        Self {
            store,
            navigator,
            routes,
            privileged_role: privileged_role.to_string(),
            guard,
            view: None,
            rendered_phase: None,
            on_phase_change: Rc::new(on_phase_change),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.view.is_some()
    }

    /// Resolver la ruta actual (carga inicial, popstate, links internos)
    pub fn route(&mut self) -> ShellRender {
        let path = self.navigator.current_path();

        if !self.routes.is_protected(&path) {
            log::info!("🌐 [SHELL] Ruta pública {}, contenido externo", path);
            self.unmount();
            return ShellRender::Clear;
        }

        let phase = match &self.view {
            Some(view) => view.on_navigate(&path),
            None => self.mount(),
        };
        self.render_for(phase)
    }

    /// Navegación interna sin recargar
    pub fn navigate(&mut self, path: &str) -> ShellRender {
        if self.navigator.current_path() != path {
            self.navigator.push(path);
        }
        self.route()
    }

    /// Re-sincronizar tras un cambio de fase del guard (p.ej. evento `storage`)
    pub fn sync_with_guard(&mut self) -> ShellRender {
        let phase = match &self.view {
            Some(view) => view.phase(),
            None => return ShellRender::Unchanged,
        };
        if self.rendered_phase == Some(phase) {
            return ShellRender::Unchanged;
        }
        self.render_for(phase)
    }

    fn mount(&mut self) -> GuardPhase {
        let view = self.guard.mount();
        let notify = self.on_phase_change.clone();
        view.subscribe_phase(move |phase: &GuardPhase| {
            log::info!("🔁 [SHELL] Fase del guard: {:?}", phase);
            notify(*phase);
        });
        let phase = view.phase();
        self.view = Some(view);
        log::info!("🔐 [SHELL] Vista protegida montada ({:?})", phase);
        phase
    }

    fn unmount(&mut self) {
        self.rendered_phase = None;
        if self.view.take().is_some() {
            log::info!("🧹 [SHELL] Vista protegida eliminada");
        }
    }

    fn render_for(&mut self, phase: GuardPhase) -> ShellRender {
        match phase {
            GuardPhase::Allowed => {
                self.rendered_phase = Some(phase);
                let path = self.navigator.current_path();
                ShellRender::Dashboard(DashboardState {
                    section: DashboardSection::from_path(&self.routes, &path),
                    profile: current_profile(self.store.as_ref()),
                    privileged: get_role_flag(self.store.as_ref(), &self.privileged_role),
                    path,
                })
            }
            GuardPhase::Redirecting => {
                // La navegación reemplaza la vista: termina este render pass
                self.unmount();
                ShellRender::Clear
            }
            GuardPhase::Mounting | GuardPhase::Checking => {
                self.rendered_phase = Some(phase);
                ShellRender::Checking
            }
        }
    }
}

impl<S, N> ShellViewModel<S, N>
where
    S: SessionStore + SessionWriter + 'static,
    N: Navigator + 'static,
{
    /// Sign-out en esta pestaña: borrar sesión y salir del área protegida
    pub fn sign_out(&mut self) -> Result<ShellRender, SessionError> {
        auth_service::sign_out(self.store.as_ref())?;
        self.unmount();
        self.navigator.push(&self.routes.sign_in);
        Ok(ShellRender::Clear)
    }
}
