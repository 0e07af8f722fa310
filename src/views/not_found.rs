// ============================================================================
// NOT FOUND VIEW - Ruta desconocida
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::{navigate, Route};
use crate::utils::t;

pub fn render_not_found(lang: &str) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("not-found-screen").build();

    let code = ElementBuilder::new("h1")?.text("404").build();
    append_child(&screen, &code)?;

    let message = ElementBuilder::new("p")?.text(&t(lang, "not_found")).build();
    append_child(&screen, &message)?;

    let back = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "button")?
        .text(&t(lang, "go_to_products"))
        .build();
    on_click(&back, |_| navigate(&Route::Products))?;
    append_child(&screen, &back)?;

    Ok(screen)
}
