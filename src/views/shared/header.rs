use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};
use crate::dom::ElementBuilder;
use crate::models::UserProfile;

/// Header: título, usuario actual y botón de sign-out
pub fn render_header(profile: Option<&UserProfile>, privileged: bool) -> Result<Element, JsValue> {
    let title = ElementBuilder::new("h1")?
        .class("app-title")
        .text("T-Coin Admin")
        .build();

    let mut user_box = ElementBuilder::new("div")?.class("header-user");
    if let Some(profile) = profile {
        let name = ElementBuilder::new("span")?
            .class("header-user-name")
            .text(profile.display_name())
            .build();
        let badge_class = if privileged { "role-badge role-badge--privileged" } else { "role-badge" };
        let badge = ElementBuilder::new("span")?
            .class(badge_class)
            .text(&profile.role)
            .build();
        user_box = user_box.child(name)?.child(badge)?;
    }

    let sign_out = ElementBuilder::new("button")?
        .class("btn-sign-out")
        .attr("type", "button")?
        .text("Sign out")
        .on_click(|e: MouseEvent| {
            e.prevent_default();
            crate::sign_out_and_redirect();
        })?
        .build();

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .child(title)?
        .child(user_box.child(sign_out)?.build())?
        .build())
}
