// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use crate::state::{ProductState, SessionState, TableUiState};
use crate::utils::TOAST_DURATION_MS;

/// Ruta actual de la SPA (hash routing)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Products,
    NotFound,
}

impl Route {
    /// Parsear la ruta desde location.hash.
    /// `/` y el hash vacío van al listado (el guard decide el redirect).
    pub fn from_hash(hash: &str) -> Self {
        match hash.trim_start_matches('#') {
            "" | "/" | "/products" => Route::Products,
            "/login" => Route::Login,
            _ => Route::NotFound,
        }
    }

    pub fn hash(&self) -> &'static str {
        match self {
            Route::Login => "#/login",
            Route::Products => "#/products",
            Route::NotFound => "#/404",
        }
    }
}

/// Navegar cambiando el hash; el listener de hashchange re-renderiza
pub fn navigate(route: &Route) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(route.hash());
    }
}

/// Tipo de toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Estado global: sesión + productos + estado UI de la tabla + toasts.
/// Se comparte clonando (todos los campos son Rc); las mutaciones
/// disparan rerender_app(), que redibuja la ruta actual completa.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub products: ProductState,
    pub products_table: TableUiState,

    pub language: Rc<RefCell<String>>,
    pub toasts: Rc<RefCell<Vec<Toast>>>,
    next_toast_id: Rc<RefCell<u32>>,
}

impl AppState {
    pub fn new() -> Self {
        let language = Self::load_string_pref("language", "RU".to_string());

        Self {
            session: SessionState::new(),
            products: ProductState::new(),
            products_table: TableUiState::new("productsTable"),
            language: Rc::new(RefCell::new(language)),
            toasts: Rc::new(RefCell::new(Vec::new())),
            next_toast_id: Rc::new(RefCell::new(0)),
        }
    }

    /// Cargar preferencia string desde localStorage
    fn load_string_pref(key: &str, default: String) -> String {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(value)) = storage.get_item(key) {
                    return value;
                }
            }
        }
        default
    }

    pub fn language(&self) -> String {
        self.language.borrow().clone()
    }

    /// Mostrar un toast y programar su auto-cierre
    pub fn push_toast(&self, kind: ToastKind, message: impl Into<String>) {
        let id = {
            let mut next = self.next_toast_id.borrow_mut();
            *next += 1;
            *next
        };
        self.toasts.borrow_mut().push(Toast {
            id,
            kind,
            message: message.into(),
        });
        crate::rerender_app();

        let toasts = self.toasts.clone();
        Timeout::new(TOAST_DURATION_MS, move || {
            toasts.borrow_mut().retain(|toast| toast.id != id);
            crate::rerender_app();
        })
        .forget();
    }

    pub fn toast_success(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message);
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Error, message);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_parsing_covers_all_paths() {
        assert_eq!(Route::from_hash(""), Route::Products);
        assert_eq!(Route::from_hash("#/"), Route::Products);
        assert_eq!(Route::from_hash("#/products"), Route::Products);
        assert_eq!(Route::from_hash("#/login"), Route::Login);
        assert_eq!(Route::from_hash("#/whatever"), Route::NotFound);
    }
}
