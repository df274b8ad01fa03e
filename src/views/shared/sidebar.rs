use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};
use crate::config::RouteConfig;
use crate::dom::ElementBuilder;
use crate::models::DashboardSection;

/// Secciones visibles para el usuario actual
pub fn visible_sections(privileged: bool) -> Vec<DashboardSection> {
    DashboardSection::ALL
        .into_iter()
        .filter(|section| privileged || !section.requires_privileged())
        .collect()
}

/// Sidebar de navegación. Los links navegan sin recargar (pushState).
pub fn render_sidebar(
    routes: &RouteConfig,
    active: Option<DashboardSection>,
    privileged: bool,
) -> Result<Element, JsValue> {
    let mut list = ElementBuilder::new("ul")?.class("sidebar-list");

    for section in visible_sections(privileged) {
        let path = section.path(routes);
        let class = if active == Some(section) { "sidebar-link active" } else { "sidebar-link" };
        let target = path.clone();
        let link = ElementBuilder::new("a")?
            .class(class)
            .attr("href", &path)?
            .text(section.title())
            .on_click(move |e: MouseEvent| {
                e.prevent_default();
                crate::navigate_to(&target);
            })?
            .build();
        let item = ElementBuilder::new("li")?.child(link)?.build();
        list = list.child(item)?;
    }

    Ok(ElementBuilder::new("nav")?
        .class("sidebar")
        .child(list.build())?
        .build())
}
