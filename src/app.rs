// ============================================================================
// APP - Shell de la aplicación: routing por hash + guard de sesión
// ============================================================================
// Render completo por evento: cada interacción relevante termina en
// rerender_app(), que limpia el root y vuelve a dibujar la ruta
// actual. El estado que debe sobrevivir vive en AppState, no en el DOM.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, create_element, document, get_element_by_id, set_inner_html};
use crate::state::{navigate, AppState, Route};
use crate::viewmodels::product_viewmodel::sorted_query;
use crate::viewmodels::{AuthViewModel, ProductViewModel};
use crate::views::{render_login, render_not_found, render_products, render_toasts};

pub struct App {
    state: AppState,
    products_loaded: Rc<RefCell<bool>>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            state: AppState::new(),
            products_loaded: Rc::new(RefCell::new(false)),
        })
    }

    /// Intentar restaurar la sesión desde el refresh token persistido.
    /// Corre async y re-renderiza al resolver.
    pub fn restore_session(&self) {
        AuthViewModel::new(self.state.clone()).restore_session();
    }

    /// Render completo de la ruta actual dentro de #app
    pub fn render(&self) -> Result<(), JsValue> {
        let route = self.guarded_route();

        let root = self.root_element()?;
        set_inner_html(&root, "");

        let view = match route {
            Route::Login => {
                // Al volver al login el próximo ingreso refetchea
                *self.products_loaded.borrow_mut() = false;
                render_login(&self.state)?
            }
            Route::Products => {
                self.schedule_initial_fetch();
                render_products(&self.state)?
            }
            Route::NotFound => render_not_found(&self.state.language())?,
        };
        append_child(&root, &view)?;

        let toasts = self.state.toasts.borrow();
        if !toasts.is_empty() {
            append_child(&root, &render_toasts(&toasts)?)?;
        }

        Ok(())
    }

    /// Guard de rutas: sin sesión todo redirige al login; con sesión
    /// el login redirige al listado
    fn guarded_route(&self) -> Route {
        let hash = crate::dom::window()
            .map(|w| w.location().hash().unwrap_or_default())
            .unwrap_or_default();
        let requested = Route::from_hash(&hash);
        let authenticated = self.state.session.is_authenticated();

        if !authenticated {
            if requested == Route::Login || requested == Route::NotFound {
                return requested;
            }
            navigate(&Route::Login);
            return Route::Login;
        }
        if requested == Route::Login {
            navigate(&Route::Products);
            return Route::Products;
        }
        requested
    }

    /// Primer fetch del listado, diferido para no re-renderizar dentro
    /// del render en curso. El orden persistido de la tabla se siembra
    /// en el query ANTES de programar el fetch, así la carga inicial ya
    /// sale ordenada con un único request.
    fn schedule_initial_fetch(&self) {
        if *self.products_loaded.borrow() {
            return;
        }
        *self.products_loaded.borrow_mut() = true;
        self.seed_persisted_sort();

        let state = self.state.clone();
        Timeout::new(0, move || {
            let vm = ProductViewModel::new(state);
            vm.fetch_categories();
            vm.fetch_products();
        })
        .forget();
    }

    /// Volcar el orden persistido al query de forma síncrona y marcarlo
    /// como reproducido, para que la tabla no lo re-emita al montarse
    fn seed_persisted_sort(&self) {
        let table = &self.state.products_table;
        let sort = table.get_sort();
        if !sort.is_active() || *table.sort_replayed.borrow() {
            return;
        }
        *table.sort_replayed.borrow_mut() = true;

        let mut query = self.state.products.query.borrow_mut();
        *query = sorted_query(&query, &sort);
    }

    fn root_element(&self) -> Result<Element, JsValue> {
        if let Some(root) = get_element_by_id("app") {
            return Ok(root);
        }
        // Primer render sin #app en el HTML: se crea bajo body
        let root = create_element("div")?;
        root.set_attribute("id", "app")?;
        let body = document()
            .and_then(|d| d.body())
            .ok_or_else(|| JsValue::from_str("No body"))?;
        append_child(&body, &root)?;
        Ok(root)
    }
}
