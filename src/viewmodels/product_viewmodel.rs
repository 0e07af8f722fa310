// ============================================================================
// PRODUCT VIEWMODEL - Lógica de negocio del listado de productos
// ============================================================================
// Orquesta búsqueda con debounce, orden, paginación, filtro por
// categoría y las escrituras optimistas de alta/edición. Las vistas
// solo llaman métodos de acá; el fetch siempre sale del ProductQuery
// actual como única fuente de verdad.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

use crate::models::{Product, ProductQuery};
use crate::services::ApiClient;
use crate::state::{AppState, SortState};
use crate::utils::{t, DEFAULT_PAGE_SIZE, SEARCH_DEBOUNCE_MS};

/// Query resultante de aplicar un término de búsqueda: la búsqueda
/// vuelve a la página 1 y, si el término no está vacío, desplaza al
/// filtro de categoría (el endpoint de categoría ignora `q`).
pub fn searched_query(query: &ProductQuery, term: &str) -> ProductQuery {
    let mut next = query.clone();
    next.q = term.to_string();
    next.skip = 0;
    if !term.is_empty() {
        next.category = None;
    }
    next
}

/// Query resultante de un cambio de orden; el estado "sin ordenar"
/// limpia ambos parámetros. La ventana de página no cambia.
pub fn sorted_query(query: &ProductQuery, sort: &SortState) -> ProductQuery {
    let mut next = query.clone();
    if sort.is_active() {
        next.sort_by = Some(sort.key.clone());
        next.order = sort.direction;
    } else {
        next.sort_by = None;
        next.order = None;
    }
    next
}

#[derive(Clone)]
pub struct ProductViewModel {
    state: AppState,
    api: ApiClient,
    search_debounce: Rc<RefCell<Option<Timeout>>>,
}

impl ProductViewModel {
    pub fn new(state: AppState) -> Self {
        let api = ApiClient::new(state.session.clone());
        Self {
            state,
            api,
            search_debounce: Rc::new(RefCell::new(None)),
        }
    }

    /// Fetch del listado con el query actual
    pub fn fetch_products(&self) {
        let vm = self.clone();
        *self.state.products.is_fetching.borrow_mut() = true;
        crate::rerender_app();

        spawn_local(async move {
            let query = vm.state.products.get_query();
            match vm.api.search_products(&query).await {
                Ok(response) => {
                    vm.state.products.apply_response(response);
                }
                Err(error) => {
                    log::warn!("❌ [PRODUCTS] Fetch falló: {}", error);
                    let lang = vm.state.language();
                    vm.state.toast_error(t(&lang, "products_load_error"));
                }
            }
            *vm.state.products.is_fetching.borrow_mut() = false;
            crate::rerender_app();
        });
    }

    /// Cargar los slugs de categoría del filtro (una vez por sesión).
    /// Si falla no hay toast: el filtro simplemente queda vacío.
    pub fn fetch_categories(&self) {
        if !self.state.products.categories.borrow().is_empty() {
            return;
        }
        let vm = self.clone();
        spawn_local(async move {
            match vm.api.get_categories().await {
                Ok(categories) => {
                    *vm.state.products.categories.borrow_mut() = categories;
                    crate::rerender_app();
                }
                Err(error) => {
                    log::warn!("⚠️ [PRODUCTS] Categorías no disponibles: {}", error);
                }
            }
        });
    }

    /// Cambio en el input de búsqueda. El valor visible se refleja al
    /// instante; el fetch se dispara tras el quiet period del debounce.
    /// Vaciar el input limpia la búsqueda de inmediato, sin debounce.
    pub fn on_search_value_change(&self, value: String) {
        *self.state.products.search_value.borrow_mut() = value.clone();

        // Cancelar el timer pendiente (drop cancela el Timeout)
        self.search_debounce.borrow_mut().take();

        if value.trim().is_empty() {
            self.apply_search_term(String::new());
            return;
        }

        let vm = self.clone();
        let timer = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            vm.apply_search_term(value.trim().to_string());
        });
        *self.search_debounce.borrow_mut() = Some(timer);
    }

    fn apply_search_term(&self, term: String) {
        {
            let mut query = self.state.products.query.borrow_mut();
            let next = searched_query(&query, &term);
            if *query == next {
                return;
            }
            *query = next;
        }
        self.fetch_products();
    }

    /// Cambio de orden emitido por la tabla (incluida la re-emisión del
    /// orden persistido al montar)
    pub fn on_sort(&self, sort: &SortState) {
        {
            let mut query = self.state.products.query.borrow_mut();
            let next = sorted_query(&query, sort);
            *query = next;
        }
        self.fetch_products();
    }

    /// Salto a una página concreta: skip = (página - 1) * limit
    pub fn on_pagination(&self, page: u32) {
        {
            let mut query = self.state.products.query.borrow_mut();
            query.skip = (page.max(1) - 1) * query.limit;
        }
        self.fetch_products();
    }

    /// Filtro por categoría. Categoría vacía resetea el listado a los
    /// parámetros por defecto y limpia la búsqueda.
    pub fn on_filter(&self, category: Option<String>) {
        {
            let mut query = self.state.products.query.borrow_mut();
            match category {
                Some(slug) if !slug.is_empty() => {
                    query.category = Some(slug);
                    query.q = String::new();
                    query.skip = 0;
                }
                _ => {
                    *query = ProductQuery {
                        limit: DEFAULT_PAGE_SIZE,
                        sort_by: query.sort_by.clone(),
                        order: query.order,
                        ..ProductQuery::default()
                    };
                }
            }
        }
        *self.state.products.search_value.borrow_mut() = String::new();
        self.fetch_products();
    }

    /// Alta inline: POST al backend y parche optimista de la página
    /// actual (fila nueva al frente, sale la primera). La fila de alta
    /// se cierra solo si el POST tuvo éxito; mientras tanto el
    /// borrador queda guardado para que el re-render no lo descarte.
    pub fn on_add_row(&self, fields: HashMap<String, String>) {
        let vm = self.clone();
        *self.state.products_table.inline_draft.borrow_mut() = Some(fields.clone());
        *self.state.products.is_updating.borrow_mut() = true;
        crate::rerender_app();

        spawn_local(async move {
            let record = Product::from_fields(0, &fields);
            let lang = vm.state.language();

            match vm.api.add_product(&record).await {
                Ok(created) => {
                    log::info!("✅ [PRODUCTS] Alta ok: id {}", created.id);
                    vm.state.products.apply_add(created);
                    *vm.state.products_table.show_add_row.borrow_mut() = false;
                    *vm.state.products_table.inline_draft.borrow_mut() = None;
                    vm.state.toast_success(t(&lang, "row_added"));
                }
                Err(error) => {
                    // El borrador se conserva para reintentar
                    log::warn!("❌ [PRODUCTS] Alta falló: {}", error);
                    vm.state.toast_error(t(&lang, "row_save_error"));
                }
            }
            *vm.state.products.is_updating.borrow_mut() = false;
            crate::rerender_app();
        });
    }

    /// Edición inline: PUT con el producto parcheado y reemplazo local
    /// por id. La fila queda en modo edición hasta que el PUT resuelva
    /// con éxito.
    pub fn on_edit_row(&self, row_id: u64, fields: HashMap<String, String>) {
        let Some(existing) = self
            .state
            .products
            .get_products()
            .into_iter()
            .find(|p| p.id == row_id)
        else {
            return;
        };

        let vm = self.clone();
        *self.state.products_table.inline_draft.borrow_mut() = Some(fields.clone());
        *self.state.products.is_updating.borrow_mut() = true;
        crate::rerender_app();

        spawn_local(async move {
            let patched = existing.patched_with(&fields);
            let lang = vm.state.language();

            match vm.api.update_product(&patched).await {
                Ok(updated) => {
                    log::info!("✅ [PRODUCTS] Edición ok: id {}", updated.id);
                    vm.state.products.apply_edit(updated);
                    *vm.state.products_table.edit_row_id.borrow_mut() = None;
                    *vm.state.products_table.inline_draft.borrow_mut() = None;
                    vm.state.toast_success(t(&lang, "row_updated"));
                }
                Err(error) => {
                    // El borrador se conserva, la fila sigue en edición
                    log::warn!("❌ [PRODUCTS] Edición falló: {}", error);
                    vm.state.toast_error(t(&lang, "row_save_error"));
                }
            }
            *vm.state.products.is_updating.borrow_mut() = false;
            crate::rerender_app();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;

    #[test]
    fn search_term_resets_window_and_displaces_category() {
        let query = ProductQuery {
            q: String::new(),
            limit: 5,
            skip: 20,
            sort_by: Some("price".into()),
            order: Some(SortDirection::Asc),
            category: Some("beauty".into()),
        };
        let next = searched_query(&query, "phone");
        assert_eq!(next.q, "phone");
        assert_eq!(next.skip, 0);
        assert_eq!(next.category, None);
        // el orden activo sobrevive a la búsqueda
        assert_eq!(next.sort_by.as_deref(), Some("price"));
    }

    #[test]
    fn clearing_search_keeps_category_filter() {
        let query = ProductQuery {
            category: Some("beauty".into()),
            ..ProductQuery::default()
        };
        let next = searched_query(&query, "");
        assert_eq!(next.category.as_deref(), Some("beauty"));
        assert!(next.q.is_empty());
    }

    #[test]
    fn sort_state_maps_onto_query_parameters() {
        let query = ProductQuery::default();
        let sorted = sorted_query(
            &query,
            &SortState {
                key: "title".into(),
                direction: Some(SortDirection::Desc),
            },
        );
        assert_eq!(sorted.sort_by.as_deref(), Some("title"));
        assert_eq!(sorted.order, Some(SortDirection::Desc));

        let cleared = sorted_query(&sorted, &SortState::unsorted());
        assert_eq!(cleared.sort_by, None);
        assert_eq!(cleared.order, None);
        // la ventana de página no se toca
        assert_eq!(cleared.skip, query.skip);
    }
}
