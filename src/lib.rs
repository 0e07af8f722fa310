// ============================================================================
// PRODUCT CONSOLE - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con el backend
// ============================================================================

mod app;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_logger::Config;

use crate::app::App;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para mejor debugging en consola
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::default());
    log::info!("🚀 Product Console - Rust Puro + MVVM");

    let app = App::new()?;
    app.render()?;
    app.restore_session();

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Routing por hash: cada cambio de hash re-renderiza.
    // Este listener global se registra UNA sola vez en init(), por lo
    // que forget() es seguro.
    if let Some(window) = web_sys::window() {
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            log::info!("🧭 [ROUTER] hashchange, re-renderizando...");
            rerender_app();
        }) as Box<dyn FnMut(web_sys::Event)>);
        window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Re-render completo de la app (la llaman viewmodels y listeners)
pub fn rerender_app() {
    APP.with(|app_cell| {
        let Ok(guard) = app_cell.try_borrow() else {
            // Ya hay un render en curso
            return;
        };
        if let Some(app) = guard.as_ref() {
            if let Err(error) = app.render() {
                log::error!("❌ Error re-renderizando: {:?}", error);
            }
        }
    });
}
