// ============================================================================
// DASHBOARD VIEW - Layout del área protegida
// ============================================================================
// Solo se renderiza con el guard en ALLOWED. El contenido de cada sección
// (CRUD) lo monta la página externa dentro de `#page-slot`.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::RouteConfig;
use crate::dom::ElementBuilder;
use crate::models::{DashboardSection, UserProfile};
use crate::views::shared::{render_header, render_sidebar};

pub struct DashboardContext<'a> {
    pub routes: &'a RouteConfig,
    pub path: &'a str,
    pub section: Option<DashboardSection>,
    pub profile: Option<UserProfile>,
    pub privileged: bool,
}

/// Qué mostrar en el área de contenido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Page(DashboardSection),
    Restricted(DashboardSection),
    NotFound,
}

pub fn content_kind(section: Option<DashboardSection>, privileged: bool) -> ContentKind {
    match section {
        None => ContentKind::NotFound,
        Some(section) if section.requires_privileged() && !privileged => {
            ContentKind::Restricted(section)
        }
        Some(section) => ContentKind::Page(section),
    }
}

fn render_notice(class: &str, title: &str, message: &str) -> Result<Element, JsValue> {
    let heading = ElementBuilder::new("h2")?.text(title).build();
    let body = ElementBuilder::new("p")?.text(message).build();
    Ok(ElementBuilder::new("section")?
        .class(class)
        .child(heading)?
        .child(body)?
        .build())
}

fn render_content(ctx: &DashboardContext) -> Result<Element, JsValue> {
    match content_kind(ctx.section, ctx.privileged) {
        ContentKind::NotFound => {
            log::warn!("⚠️ [DASHBOARD] Ruta sin sección: {}", ctx.path);
            render_notice("dashboard-notice", "Page not found", ctx.path)
        }
        ContentKind::Restricted(section) => {
            log::info!("🚫 [DASHBOARD] {} requiere rol privilegiado", section.title());
            render_notice(
                "dashboard-notice dashboard-notice--restricted",
                section.title(),
                "You do not have permission to view this section.",
            )
        }
        ContentKind::Page(section) => {
            let slug = match section.slug() {
                "" => "overview",
                slug => slug,
            };
            let heading = ElementBuilder::new("h2")?.text(section.title()).build();
            let slot = ElementBuilder::new("div")?
                .class("page-slot")
                .attr("id", "page-slot")?
                .build();
            Ok(ElementBuilder::new("section")?
                .class("dashboard-content")
                .attr("data-section", slug)?
                .attr("data-path", ctx.path)?
                .child(heading)?
                .child(slot)?
                .build())
        }
    }
}

/// Renderizar el layout completo del dashboard
pub fn render_dashboard(ctx: &DashboardContext) -> Result<Element, JsValue> {
    log::info!("🎬 [DASHBOARD] render {}", ctx.path);

    let header = render_header(ctx.profile.as_ref(), ctx.privileged)?;
    let sidebar = render_sidebar(ctx.routes, ctx.section, ctx.privileged)?;
    let main = ElementBuilder::new("main")?
        .class("dashboard-main")
        .child(render_content(ctx)?)?
        .build();
    let body = ElementBuilder::new("div")?
        .class("dashboard-body")
        .children([sidebar, main])?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("dashboard-layout")
        .children([header, body])?
        .build())
}
