use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    DEFAULT_DASHBOARD_PREFIX, DEFAULT_PRIVILEGED_ROLE, DEFAULT_SIGN_IN_ROUTE,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url_development: String,
    pub api_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub routes: RouteConfig,
    /// Valor de `user.type` que habilita las funciones privilegiadas
    pub privileged_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub sign_in: String,
    pub dashboard_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url_development: "http://localhost:5000/api".to_string(),
            api_url_production: "https://api.t-coin.app/api".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            routes: RouteConfig::default(),
            privileged_role: DEFAULT_PRIVILEGED_ROLE.to_string(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            sign_in: DEFAULT_SIGN_IN_ROUTE.to_string(),
            dashboard_prefix: DEFAULT_DASHBOARD_PREFIX.to_string(),
        }
    }
}

impl RouteConfig {
    /// ¿La ruta pertenece al área protegida?
    /// `/dashboard` y `/dashboard/...` sí; `/dashboardx` no.
    pub fn is_protected(&self, path: &str) -> bool {
        let prefix = self.dashboard_prefix.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url_development: option_env!("API_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.api_url_development),
            api_url_production: option_env!("API_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.api_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            routes: RouteConfig {
                sign_in: option_env!("SIGN_IN_ROUTE")
                    .unwrap_or(DEFAULT_SIGN_IN_ROUTE)
                    .to_string(),
                dashboard_prefix: option_env!("DASHBOARD_PREFIX")
                    .unwrap_or(DEFAULT_DASHBOARD_PREFIX)
                    .to_string(),
            },
            privileged_role: option_env!("PRIVILEGED_ROLE")
                .unwrap_or(DEFAULT_PRIVILEGED_ROLE)
                .to_string(),
        }
    }

    /// URL del API según el entorno actual
    pub fn api_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.api_url_production,
            _ => &self.api_url_development,
        }
    }

    /// Nivel de log para wasm-logger
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
