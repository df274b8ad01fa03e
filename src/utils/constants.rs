// ============================================================================
// CONSTANTES - Claves de storage y rutas por defecto
// ============================================================================

/// Token de sesión (string opaco, lo emite el API externo)
pub const STORAGE_KEY_AUTH_TOKEN: &str = "authToken";

/// Perfil del usuario serializado en JSON (`{ "type": ... }`)
pub const STORAGE_KEY_USER: &str = "user";

/// Ruta de la página de sign-in (externa a este crate)
pub const DEFAULT_SIGN_IN_ROUTE: &str = "/auth/signin";

/// Prefijo del área protegida
pub const DEFAULT_DASHBOARD_PREFIX: &str = "/dashboard";

/// Rol con funciones privilegiadas
pub const DEFAULT_PRIVILEGED_ROLE: &str = "super_admin";

/// Id del elemento raíz donde se monta la app
pub const APP_ROOT_ID: &str = "app";
