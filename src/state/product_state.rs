// ============================================================================
// PRODUCT STATE - Lista cacheada de productos + parámetros de consulta
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Product, ProductQuery, ProductsResponse};

/// Estado del listado de productos. Los writes de la API remota no
/// persisten, así que add/edit parchean la lista local (overlay
/// optimista que simula persistencia, no una garantía de consistencia).
#[derive(Clone)]
pub struct ProductState {
    pub products: Rc<RefCell<Vec<Product>>>,
    pub total: Rc<RefCell<u32>>,
    pub query: Rc<RefCell<ProductQuery>>,
    pub search_value: Rc<RefCell<String>>,
    pub categories: Rc<RefCell<Vec<String>>>,
    pub is_fetching: Rc<RefCell<bool>>,
    pub is_updating: Rc<RefCell<bool>>,
}

impl ProductState {
    pub fn new() -> Self {
        Self {
            products: Rc::new(RefCell::new(Vec::new())),
            total: Rc::new(RefCell::new(0)),
            query: Rc::new(RefCell::new(ProductQuery::default())),
            search_value: Rc::new(RefCell::new(String::new())),
            categories: Rc::new(RefCell::new(Vec::new())),
            is_fetching: Rc::new(RefCell::new(false)),
            is_updating: Rc::new(RefCell::new(false)),
        }
    }

    /// Volcar una respuesta del servidor en el estado
    pub fn apply_response(&self, response: ProductsResponse) {
        *self.products.borrow_mut() = response.products;
        *self.total.borrow_mut() = response.total;
        let mut query = self.query.borrow_mut();
        query.skip = response.skip;
        if response.limit > 0 {
            query.limit = response.limit;
        }
    }

    /// Parche local tras un add exitoso: la fila nueva entra al frente
    /// y sale la última de la página (como si el servidor la hubiera
    /// insertado y re-paginado)
    pub fn apply_add(&self, product: Product) {
        let mut products = self.products.borrow_mut();
        products.pop();
        products.insert(0, product);
        *self.total.borrow_mut() += 1;
    }

    /// Parche local tras un edit exitoso: reemplazo por id
    pub fn apply_edit(&self, product: Product) {
        let mut products = self.products.borrow_mut();
        for existing in products.iter_mut() {
            if existing.id == product.id {
                *existing = product;
                break;
            }
        }
    }

    pub fn get_products(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    pub fn get_query(&self) -> ProductQuery {
        self.query.borrow().clone()
    }
}

impl Default for ProductState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn product(id: u64, title: &str) -> Product {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), title.to_string());
        Product::from_fields(id, &fields)
    }

    #[test]
    fn apply_add_prepends_and_drops_last() {
        let state = ProductState::new();
        *state.products.borrow_mut() = vec![product(1, "a"), product(2, "b"), product(3, "c")];
        *state.total.borrow_mut() = 3;

        state.apply_add(product(99, "new"));

        let products = state.products.borrow();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, 99);
        assert_eq!(products[2].id, 2);
        assert_eq!(*state.total.borrow(), 4);
    }

    #[test]
    fn apply_edit_replaces_by_id() {
        let state = ProductState::new();
        *state.products.borrow_mut() = vec![product(1, "a"), product(2, "b")];

        state.apply_edit(product(2, "edited"));

        let products = state.products.borrow();
        assert_eq!(products[1].title, "edited");
        assert_eq!(products[0].title, "a");
    }

    #[test]
    fn apply_response_syncs_query_window() {
        let state = ProductState::new();
        state.apply_response(ProductsResponse {
            products: vec![product(1, "a")],
            total: 42,
            skip: 10,
            limit: 5,
        });
        assert_eq!(*state.total.borrow(), 42);
        assert_eq!(state.query.borrow().skip, 10);
        assert_eq!(state.query.borrow().limit, 5);
    }
}
