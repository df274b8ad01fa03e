use crate::config::RouteConfig;

/// Secciones del dashboard. El contenido de cada una (formularios CRUD,
/// tablas) lo aporta la página externa montada en su slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DashboardSection {
    Overview,
    Investors,
    Agents,
    Countries,
    Categories,
    BreakingNews,
    Notifications,
    Remittances,
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 8] = [
        DashboardSection::Overview,
        DashboardSection::Investors,
        DashboardSection::Agents,
        DashboardSection::Countries,
        DashboardSection::Categories,
        DashboardSection::BreakingNews,
        DashboardSection::Notifications,
        DashboardSection::Remittances,
    ];

    /// Segmento de URL bajo el prefijo del dashboard ("" = raíz)
    pub fn slug(self) -> &'static str {
        match self {
            DashboardSection::Overview => "",
            DashboardSection::Investors => "investors",
            DashboardSection::Agents => "agents",
            DashboardSection::Countries => "countries",
            DashboardSection::Categories => "categories",
            DashboardSection::BreakingNews => "breaking-news",
            DashboardSection::Notifications => "notifications",
            DashboardSection::Remittances => "remittances",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DashboardSection::Overview => "Overview",
            DashboardSection::Investors => "Investors",
            DashboardSection::Agents => "Agents",
            DashboardSection::Countries => "Countries",
            DashboardSection::Categories => "Categories",
            DashboardSection::BreakingNews => "Breaking News",
            DashboardSection::Notifications => "Notifications",
            DashboardSection::Remittances => "Remittances",
        }
    }

    /// Solo visibles para el rol privilegiado
    pub fn requires_privileged(self) -> bool {
        matches!(self, DashboardSection::Agents | DashboardSection::Countries)
    }

    pub fn path(self, routes: &RouteConfig) -> String {
        let prefix = routes.dashboard_prefix.trim_end_matches('/');
        match self.slug() {
            "" => prefix.to_string(),
            slug => format!("{}/{}", prefix, slug),
        }
    }

    /// Resolver la sección de una ruta protegida.
    /// Sub-rutas (`/dashboard/investors/12/edit`) pertenecen a su sección.
    pub fn from_path(routes: &RouteConfig, path: &str) -> Option<Self> {
        if !routes.is_protected(path) {
            return None;
        }
        let prefix = routes.dashboard_prefix.trim_end_matches('/');
        let first_segment = path[prefix.len()..]
            .split('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("");

        Self::ALL
            .into_iter()
            .find(|section| section.slug() == first_segment)
    }
}
