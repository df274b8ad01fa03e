// ============================================================================
// CHECKING VIEW - Shell vacío mientras el guard no permite el acceso
// ============================================================================
// No contiene NADA del área protegida.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;

pub fn render_checking() -> Result<Element, JsValue> {
    let spinner = ElementBuilder::new("div")?
        .class("guard-spinner")
        .attr("aria-hidden", "true")?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("guard-checking")
        .attr("role", "status")?
        .attr("aria-busy", "true")?
        .child(spinner)?
        .build())
}
