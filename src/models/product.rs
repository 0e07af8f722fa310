// ============================================================================
// PRODUCT MODEL - Producto del catálogo y parámetros de búsqueda
// ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Producto tal como lo devuelve la API remota.
/// La mayoría de los campos son opcionales: la API no garantiza todos
/// los atributos para todas las categorías.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub minimum_order_quantity: Option<u32>,
}

impl Product {
    /// Valor de una columna como texto para la tabla.
    /// Campos desconocidos o ausentes devuelven None.
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "title" => Some(self.title.clone()),
            "brand" => self.brand.clone(),
            "sku" => self.sku.clone(),
            "price" => self.price.map(|p| format!("{}", p)),
            "rating" => self.rating.map(|r| format!("{}", r)),
            "category" => self.category.clone(),
            "minimumOrderQuantity" => self.minimum_order_quantity.map(|q| q.to_string()),
            _ => None,
        }
    }

    /// Construir un producto a partir de los campos editados de una fila.
    /// Los numéricos que no parsean quedan en None (la API los tolera).
    pub fn from_fields(id: u64, fields: &HashMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();
        Self {
            id,
            title: get("title").unwrap_or_default(),
            brand: get("brand"),
            sku: get("sku"),
            price: get("price").and_then(|v| v.parse::<f64>().ok()),
            rating: get("rating").and_then(|v| v.parse::<f64>().ok()),
            category: get("category"),
            description: None,
            stock: None,
            images: Vec::new(),
            thumbnail: None,
            minimum_order_quantity: get("minimumOrderQuantity").and_then(|v| v.parse().ok()),
        }
    }

    /// Aplicar los campos editados sobre una copia del producto existente
    pub fn patched_with(&self, fields: &HashMap<String, String>) -> Self {
        let mut updated = self.clone();
        for (key, value) in fields {
            let value = value.trim();
            match key.as_str() {
                "title" if !value.is_empty() => updated.title = value.to_string(),
                "brand" => updated.brand = non_empty(value),
                "sku" => updated.sku = non_empty(value),
                "price" => updated.price = value.parse::<f64>().ok(),
                "rating" => updated.rating = value.parse::<f64>().ok(),
                "category" => updated.category = non_empty(value),
                "minimumOrderQuantity" => {
                    updated.minimum_order_quantity = value.parse().ok();
                }
                _ => {}
            }
        }
        updated
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Respuesta paginada de `GET /products` y `GET /products/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub total: u32,
    pub skip: u32,
    pub limit: u32,
}

/// Dirección de ordenamiento enviada a la API (`order=asc|desc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Parámetros combinados de búsqueda/orden/paginación para el listado.
/// Invariante: skip = (page - 1) * limit; cambiar q o category resetea skip.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub q: String,
    pub limit: u32,
    pub skip: u32,
    pub sort_by: Option<String>,
    pub order: Option<SortDirection>,
    pub category: Option<String>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            limit: 5,
            skip: 0,
            sort_by: None,
            order: None,
            category: None,
        }
    }
}

impl ProductQuery {
    /// Query string para la API; omite los parámetros vacíos
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<(String, String)> = Vec::new();
        if !self.q.is_empty() {
            params.push(("q".into(), self.q.clone()));
        }
        params.push(("limit".into(), self.limit.to_string()));
        params.push(("skip".into(), self.skip.to_string()));
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy".into(), sort_by.clone()));
        }
        if let Some(order) = &self.order {
            params.push(("order".into(), order.as_str().to_string()));
        }
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Página actual implicada por skip/limit (1-based)
    pub fn page(&self) -> u32 {
        if self.limit == 0 {
            1
        } else {
            self.skip / self.limit + 1
        }
    }
}

/// Percent-encoding mínimo para valores de query (espacios y reservados)
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_omits_empty_q() {
        let query = ProductQuery::default();
        assert_eq!(query.to_query_string(), "limit=5&skip=0");
    }

    #[test]
    fn query_string_includes_sort_and_encoded_q() {
        let query = ProductQuery {
            q: "red lipstick".into(),
            limit: 10,
            skip: 20,
            sort_by: Some("price".into()),
            order: Some(SortDirection::Desc),
            category: None,
        };
        assert_eq!(
            query.to_query_string(),
            "q=red%20lipstick&limit=10&skip=20&sortBy=price&order=desc"
        );
    }

    #[test]
    fn page_from_skip_and_limit() {
        let mut query = ProductQuery::default();
        assert_eq!(query.page(), 1);
        query.skip = 10;
        query.limit = 5;
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn patched_with_overwrites_only_known_fields() {
        let base = Product::from_fields(
            7,
            &[("title".to_string(), "Mouse".to_string())]
                .into_iter()
                .collect(),
        );
        let mut fields = HashMap::new();
        fields.insert("price".to_string(), "19.9".to_string());
        fields.insert("unknown".to_string(), "x".to_string());
        let patched = base.patched_with(&fields);
        assert_eq!(patched.title, "Mouse");
        assert_eq!(patched.price, Some(19.9));
    }
}
