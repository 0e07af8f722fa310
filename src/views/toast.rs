// ============================================================================
// TOAST VIEW - Notificaciones flotantes
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::{Toast, ToastKind};

pub fn render_toasts(toasts: &[Toast]) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("toast-container").build();

    for toast in toasts {
        let class = match toast.kind {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        };
        let item = ElementBuilder::new("div")?
            .class(class)
            .text(&toast.message)
            .build();
        append_child(&container, &item)?;
    }

    Ok(container)
}
