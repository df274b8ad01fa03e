// ============================================================================
// SESSION GUARD - Control de acceso al área protegida
// ============================================================================
// MOUNTING -> CHECKING -> { ALLOWED | REDIRECTING }
// - ALLOWED se re-evalúa (pasando por CHECKING) en cada cambio de ruta y en
//   cada evento `storage` externo sobre el token.
// - REDIRECTING es terminal hasta el próximo `on_navigate`.
// El guard solo LEE el token: presencia = sesión. No valida contra el API.
// ============================================================================

use std::rc::{Rc, Weak};

use crate::config::{AppConfig, RouteConfig};
use crate::services::navigator::Navigator;
use crate::services::session_store::{SessionStore, StorageChange, Subscription};
use crate::state::ReactiveState;
use crate::utils::constants::STORAGE_KEY_AUTH_TOKEN;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GuardPhase {
    Mounting,
    Checking,
    Allowed,
    Redirecting,
}

#[derive(Clone, Debug)]
pub struct GuardSettings {
    pub token_key: String,
    pub routes: RouteConfig,
}

impl GuardSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            token_key: STORAGE_KEY_AUTH_TOKEN.to_string(),
            routes: config.routes.clone(),
        }
    }
}

#[cfg(test)]
impl Default for GuardSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

struct GuardInner<S, N> {
    store: Rc<S>,
    navigator: Rc<N>,
    settings: GuardSettings,
    phase: ReactiveState<GuardPhase>,
}

impl<S: SessionStore, N: Navigator> GuardInner<S, N> {
    fn has_token(&self) -> bool {
        self.store
            .get(&self.settings.token_key)
            .map_or(false, |token| !token.is_empty())
    }

    fn check(&self, path: &str) -> GuardPhase {
        if !self.settings.routes.is_protected(path) {
            self.phase.set(GuardPhase::Allowed);
            return GuardPhase::Allowed;
        }

        self.phase.set(GuardPhase::Checking);

        if self.has_token() {
            self.phase.set(GuardPhase::Allowed);
            GuardPhase::Allowed
        } else {
            log::info!(
                "🔒 [GUARD] Sin token en {}, redirigiendo a {}",
                path,
                self.settings.routes.sign_in
            );
            self.phase.set(GuardPhase::Redirecting);
            self.navigator.push(&self.settings.routes.sign_in);
            GuardPhase::Redirecting
        }
    }

    fn on_external_change(&self, change: &StorageChange) -> GuardPhase {
        if !change.concerns(&self.settings.token_key) {
            return self.phase.get();
        }
        if self.phase.get() == GuardPhase::Redirecting {
            log::info!("⏭️ [GUARD] Cambio externo ignorado: ya redirigiendo");
            return GuardPhase::Redirecting;
        }
        log::info!("🔄 [GUARD] Token modificado en otra pestaña, re-verificando");
        let path = self.navigator.current_path();
        self.check(&path)
    }
}

/// Fábrica de vistas protegidas: comparte store, navigator y settings
pub struct SessionGuard<S, N> {
    store: Rc<S>,
    navigator: Rc<N>,
    settings: GuardSettings,
}

impl<S, N> SessionGuard<S, N>
where
    S: SessionStore + 'static,
    N: Navigator + 'static,
{
    pub fn new(store: Rc<S>, navigator: Rc<N>, settings: GuardSettings) -> Self {
        Self { store, navigator, settings }
    }

    /// Montar una vista protegida: registra el listener de storage (una vez)
    /// y ejecuta la primera verificación sobre la ruta actual.
    pub fn mount(&self) -> ProtectedView<S, N> {
        let inner = Rc::new(GuardInner {
            store: self.store.clone(),
            navigator: self.navigator.clone(),
            settings: self.settings.clone(),
            phase: ReactiveState::new(GuardPhase::Mounting),
        });

        // El callback vive en el store: solo referencia débil al guard
        let weak: Weak<GuardInner<S, N>> = Rc::downgrade(&inner);
        let subscription = self.store.subscribe(
            &self.settings.token_key,
            Box::new(move |change: &StorageChange| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_external_change(change);
                }
            }),
        );

        let view = ProtectedView {
            _subscription: subscription,
            inner,
        };
        let path = view.inner.navigator.current_path();
        view.on_navigate(&path);
        view
    }
}

/// Instancia montada del guard. Drop = desmontar (libera el listener).
pub struct ProtectedView<S, N> {
    _subscription: Subscription,
    inner: Rc<GuardInner<S, N>>,
}

impl<S: SessionStore, N: Navigator> ProtectedView<S, N> {
    pub fn on_navigate(&self, current_path: &str) -> GuardPhase {
        self.inner.check(current_path)
    }

    pub fn on_external_session_change(&self, change: &StorageChange) -> GuardPhase {
        self.inner.on_external_change(change)
    }

    pub fn phase(&self) -> GuardPhase {
        self.inner.phase.get()
    }

    /// Notificación en cada cambio de fase
    pub fn subscribe_phase<F>(&self, callback: F)
    where
        F: Fn(&GuardPhase) + 'static,
    {
        self.inner.phase.subscribe(callback);
    }
}

impl<S, N> Drop for ProtectedView<S, N> {
    fn drop(&mut self) {
        log::info!("🔌 [GUARD] Vista protegida desmontada");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth_service::persist_sign_in;
    use crate::services::memory_store::MemorySessionStore;
    use crate::services::navigator::MemoryNavigator;
    use std::cell::RefCell;

    const SIGN_IN: &str = "/auth/signin";

    fn guard_at(
        store: &MemorySessionStore,
        path: &str,
    ) -> (SessionGuard<MemorySessionStore, MemoryNavigator>, Rc<MemoryNavigator>) {
        let navigator = Rc::new(MemoryNavigator::at(path));
        let guard = SessionGuard::new(
            Rc::new(store.clone()),
            navigator.clone(),
            GuardSettings::default(),
        );
        (guard, navigator)
    }

    #[test]
    fn mount_without_token_redirects_once() {
        let store = MemorySessionStore::new();
        let (guard, navigator) = guard_at(&store, "/dashboard");

        let view = guard.mount();

        assert_eq!(view.phase(), GuardPhase::Redirecting);
        assert_ne!(view.phase(), GuardPhase::Allowed);
        assert_eq!(navigator.pushes(), vec![SIGN_IN]);
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let store = MemorySessionStore::with_entries([("authToken", "")]);
        let (guard, navigator) = guard_at(&store, "/dashboard/investors");

        let view = guard.mount();

        assert_eq!(view.phase(), GuardPhase::Redirecting);
        assert_eq!(navigator.pushes(), vec![SIGN_IN]);
    }

    #[test]
    fn whitespace_token_accepted_by_sign_in_is_a_session() {
        let store = MemorySessionStore::new();
        persist_sign_in(&store, "   ", None).unwrap();
        let (guard, navigator) = guard_at(&store, "/dashboard");

        let view = guard.mount();

        assert_eq!(view.phase(), GuardPhase::Allowed);
        assert!(navigator.pushes().is_empty());
    }

    #[test]
    fn mount_with_token_allows_without_redirect() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, navigator) = guard_at(&store, "/dashboard");

        let view = guard.mount();

        assert_eq!(view.phase(), GuardPhase::Allowed);
        assert!(navigator.pushes().is_empty());
    }

    #[test]
    fn each_path_change_without_token_redirects_once() {
        let store = MemorySessionStore::new();
        let (guard, navigator) = guard_at(&store, "/dashboard");
        let view = guard.mount();

        navigator.set_path("/dashboard/agents");
        view.on_navigate("/dashboard/agents");

        assert_eq!(navigator.pushes(), vec![SIGN_IN, SIGN_IN]);
    }

    #[test]
    fn public_paths_are_never_redirected() {
        let store = MemorySessionStore::new();
        let (guard, navigator) = guard_at(&store, SIGN_IN);

        let view = guard.mount();

        assert_eq!(view.phase(), GuardPhase::Allowed);
        assert!(navigator.pushes().is_empty());
    }

    #[test]
    fn navigate_then_external_sign_out_redirects_exactly_once() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, navigator) = guard_at(&store, "/dashboard");
        let view = guard.mount();

        navigator.set_path("/dashboard/remittances");
        assert_eq!(view.on_navigate("/dashboard/remittances"), GuardPhase::Allowed);
        assert!(navigator.pushes().is_empty());

        store.external_remove("authToken");

        assert_eq!(view.phase(), GuardPhase::Redirecting);
        assert_eq!(navigator.pushes(), vec![SIGN_IN]);
    }

    #[test]
    fn repeated_events_while_redirecting_do_not_redirect_again() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, navigator) = guard_at(&store, "/dashboard");
        let _view = guard.mount();

        store.external_remove("authToken");
        store.external_remove("authToken");
        store.external_clear();

        assert_eq!(navigator.pushes(), vec![SIGN_IN]);
    }

    #[test]
    fn unrelated_keys_do_not_trigger_a_check() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, navigator) = guard_at(&store, "/dashboard");
        let view = guard.mount();
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let sink = transitions.clone();
        view.subscribe_phase(move |phase: &GuardPhase| sink.borrow_mut().push(*phase));

        store.external_set("user", r#"{"type":"agent"}"#);

        assert!(transitions.borrow().is_empty());
        assert!(navigator.pushes().is_empty());
    }

    #[test]
    fn full_storage_clear_triggers_redirect() {
        let store = MemorySessionStore::with_entries([("authToken", "abc"), ("user", "{}")]);
        let (guard, navigator) = guard_at(&store, "/dashboard/agents");
        let view = guard.mount();

        store.external_clear();

        assert_eq!(view.phase(), GuardPhase::Redirecting);
        assert_eq!(navigator.pushes(), vec![SIGN_IN]);
    }

    #[test]
    fn external_token_rotation_keeps_view_allowed() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, navigator) = guard_at(&store, "/dashboard");
        let view = guard.mount();

        store.external_set("authToken", "def");

        assert_eq!(view.phase(), GuardPhase::Allowed);
        assert!(navigator.pushes().is_empty());
    }

    #[test]
    fn check_passes_through_checking_state() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, _navigator) = guard_at(&store, "/dashboard");
        let view = guard.mount();
        let transitions = Rc::new(RefCell::new(Vec::new()));
        let sink = transitions.clone();
        view.subscribe_phase(move |phase: &GuardPhase| sink.borrow_mut().push(*phase));

        store.external_remove("authToken");

        assert_eq!(
            *transitions.borrow(),
            vec![GuardPhase::Checking, GuardPhase::Redirecting]
        );
    }

    #[test]
    fn direct_external_change_call_rechecks() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, navigator) = guard_at(&store, "/dashboard");
        let view = guard.mount();

        // Sin pasar por el store: el token sigue presente
        let phase = view.on_external_session_change(&StorageChange::updated("authToken"));

        assert_eq!(phase, GuardPhase::Allowed);
        assert!(navigator.pushes().is_empty());
    }

    #[test]
    fn unmount_detaches_storage_listener() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, navigator) = guard_at(&store, "/dashboard");
        let view = guard.mount();
        assert_eq!(store.listener_count(), 1);

        drop(view);
        assert_eq!(store.listener_count(), 0);

        store.external_remove("authToken");
        assert!(navigator.pushes().is_empty());
    }

    #[test]
    fn remount_registers_a_single_listener() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, navigator) = guard_at(&store, "/dashboard");

        drop(guard.mount());
        drop(guard.mount());
        let _view = guard.mount();
        assert_eq!(store.listener_count(), 1);

        store.external_remove("authToken");
        assert_eq!(navigator.pushes(), vec![SIGN_IN]);
    }

    #[test]
    fn guard_never_writes_the_token() {
        let store = MemorySessionStore::with_entries([("authToken", "abc")]);
        let (guard, _navigator) = guard_at(&store, "/dashboard");
        let view = guard.mount();

        view.on_navigate("/dashboard/categories");
        store.external_set("authToken", "abc");

        assert_eq!(store.get("authToken").as_deref(), Some("abc"));
    }
}
