// ============================================================================
// LOGIN VIEW - Pantalla de inicio de sesión
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, InputEvent};

use crate::dom::{append_child, on_change, on_input, on_submit, ElementBuilder};
use crate::state::AppState;
use crate::utils::t;
use crate::viewmodels::AuthViewModel;

/// Renderizar pantalla de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_login() llamado");
    let lang = state.language();

    // Estado local del formulario (vive en los closures)
    let email = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));
    let remember = Rc::new(RefCell::new(false));

    let screen = ElementBuilder::new("div")?.class("login-screen").build();
    let container = ElementBuilder::new("div")?.class("login-container").build();

    // Header
    let header = ElementBuilder::new("div")?.class("login-header").build();
    let logo = ElementBuilder::new("div")?.class("login-logo").text("🗂️").build();
    append_child(&header, &logo)?;
    let title = ElementBuilder::new("h1")?.text(&t(&lang, "products")).build();
    append_child(&header, &title)?;
    append_child(&container, &header)?;

    // Formulario
    let form = ElementBuilder::new("form")?.class("login-form").build();

    let email_group = text_input_group(
        "login-email",
        &t(&lang, "email"),
        "email",
        email.clone(),
    )?;
    append_child(&form, &email_group)?;

    let password_group = text_input_group(
        "login-password",
        &t(&lang, "password"),
        "password",
        password.clone(),
    )?;
    append_child(&form, &password_group)?;

    // Checkbox "recordarme"
    let remember_group = ElementBuilder::new("label")?
        .class("form-checkbox")
        .build();
    let checkbox = ElementBuilder::new("input")?
        .id("login-remember")?
        .attr("type", "checkbox")?
        .build();
    {
        let remember = remember.clone();
        on_change(&checkbox, move |event: Event| {
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            {
                *remember.borrow_mut() = target.checked();
            }
        })?;
    }
    append_child(&remember_group, &checkbox)?;
    let remember_label = ElementBuilder::new("span")?
        .text(&t(&lang, "remember_me"))
        .build();
    append_child(&remember_group, &remember_label)?;
    append_child(&form, &remember_group)?;

    // Botón de submit; con un login en vuelo queda deshabilitado
    let submit = ElementBuilder::new("button")?
        .class("btn-primary login-submit")
        .attr("type", "submit")?
        .text(&t(&lang, "sign_in"))
        .build();
    if *state.session.is_authenticating.borrow() {
        submit.set_attribute("disabled", "")?;
    }
    append_child(&form, &submit)?;

    {
        let auth = AuthViewModel::new(state.clone());
        on_submit(&form, move |event: Event| {
            event.prevent_default();
            auth.login(
                email.borrow().clone(),
                password.borrow().clone(),
                *remember.borrow(),
            );
        })?;
    }

    append_child(&container, &form)?;
    append_child(&screen, &container)?;
    Ok(screen)
}

/// Grupo label + input de texto que escribe en una celda compartida
fn text_input_group(
    id: &str,
    label: &str,
    input_type: &str,
    value: Rc<RefCell<String>>,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let label_el = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label)
        .build();
    append_child(&group, &label_el)?;

    let input = ElementBuilder::new("input")?
        .id(id)?
        .attr("type", input_type)?
        .attr("autocomplete", if input_type == "password" {
            "current-password"
        } else {
            "username"
        })?
        .build();
    on_input(&input, move |event: InputEvent| {
        if let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        {
            *value.borrow_mut() = target.value();
        }
    })?;
    append_child(&group, &input)?;

    Ok(group)
}
