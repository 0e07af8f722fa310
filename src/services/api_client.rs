// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless salvo los tokens)
// ============================================================================
// NO tiene lógica de negocio. Todas las llamadas autorizadas pasan por
// el decorador de reauth: ante un 401 con refresh token presente se
// refresca UNA vez y se reintenta el request original UNA vez; si el
// refresh falla, el 401 original se devuelve sin modificar (sin loops).
// No hay de-duplicación entre requests concurrentes: el event loop es
// single-threaded y las ráfagas de 401 simultáneos son tolerables.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use thiserror::Error;

use crate::dom::{get_local_storage, get_session_storage};
use crate::models::{
    LoginRequest, Product, ProductQuery, ProductsResponse, RefreshRequest, RefreshResponse, User,
};
use crate::state::SessionState;
use crate::utils::{BACKEND_URL, REFRESH_TOKEN_KEY, TOKEN_EXPIRES_IN_MINS};

/// Taxonomía de errores de la capa de red:
/// error estructurado de la API (con message), error de red,
/// error de (de)serialización.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Cuerpo de error estándar de la API: { "message": "..." }
#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// Cliente API - comunicación HTTP con reauth transparente
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionState,
}

impl ApiClient {
    pub fn new(session: SessionState) -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
            session,
        }
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// Login: no pasa por el decorador (todavía no hay token)
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let url = format!("{}/auth/login", self.base_url);

        log::info!("🔐 Login para usuario: {}", credentials.username);

        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Parse(e.to_string()))?;
        let response = self.send_once("POST", &url, Some(&body)).await?;
        json_of::<User>(response).await
    }

    /// Perfil del usuario autenticado
    pub async fn me(&self) -> Result<User, ApiError> {
        let url = format!("{}/auth/me", self.base_url);
        let response = self.send_with_reauth("GET", &url, None).await?;
        json_of::<User>(response).await
    }

    /// Canjear el refresh token por tokens nuevos. Actualiza el estado
    /// de sesión y el slot de storage donde vivía el token anterior.
    pub async fn refresh_tokens(&self) -> Result<RefreshResponse, ApiError> {
        let refresh_token = self
            .session
            .get_refresh_token()
            .ok_or_else(|| ApiError::Network("No refresh token".to_string()))?;

        let url = format!("{}/auth/refresh", self.base_url);
        let request = RefreshRequest {
            refresh_token,
            expires_in_mins: TOKEN_EXPIRES_IN_MINS,
        };

        log::info!("🔄 Refrescando access token...");

        let body = serde_json::to_value(&request).map_err(|e| ApiError::Parse(e.to_string()))?;
        let response = self.send_once("POST", &url, Some(&body)).await?;
        let refreshed = json_of::<RefreshResponse>(response).await?;

        self.session.set_tokens(
            refreshed.access_token.clone(),
            refreshed.refresh_token.clone(),
        );
        persist_refresh_token(&refreshed.refresh_token);

        log::info!("✅ Token refrescado");
        Ok(refreshed)
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// Búsqueda universal: con q usa /products/search, con categoría
    /// /products/category/{slug}, si no /products
    pub async fn search_products(&self, query: &ProductQuery) -> Result<ProductsResponse, ApiError> {
        let params = query.to_query_string();
        let url = if let Some(category) = &query.category {
            format!("{}/products/category/{}?{}", self.base_url, category, params)
        } else if !query.q.is_empty() {
            format!("{}/products/search?{}", self.base_url, params)
        } else {
            format!("{}/products?{}", self.base_url, params)
        };

        let response = self.send_with_reauth("GET", &url, None).await?;
        let result = json_of::<ProductsResponse>(response).await?;

        log::info!(
            "📦 Productos recibidos: {} de {} (skip {})",
            result.products.len(),
            result.total,
            result.skip
        );

        Ok(result)
    }

    /// Slugs de categoría para el filtro del listado
    pub async fn get_categories(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/products/category-list", self.base_url);
        let response = self.send_with_reauth("GET", &url, None).await?;
        json_of::<Vec<String>>(response).await
    }

    /// Alta de producto. La API no persiste el alta: el caller parchea
    /// la lista local con la respuesta.
    pub async fn add_product(&self, product: &Product) -> Result<Product, ApiError> {
        let url = format!("{}/products/add", self.base_url);
        let body = serde_json::to_value(product).map_err(|e| ApiError::Parse(e.to_string()))?;
        let response = self.send_with_reauth("POST", &url, Some(&body)).await?;
        json_of::<Product>(response).await
    }

    /// Edición de producto (tampoco persiste del lado del servidor)
    pub async fn update_product(&self, product: &Product) -> Result<Product, ApiError> {
        let url = format!("{}/products/{}", self.base_url, product.id);
        let mut body =
            serde_json::to_value(product).map_err(|e| ApiError::Parse(e.to_string()))?;
        // La API acepta el id como string en el body aunque lo devuelve
        // como número en las respuestas
        if let Some(object) = body.as_object_mut() {
            object.insert(
                "id".to_string(),
                serde_json::Value::String(product.id.to_string()),
            );
        }
        let response = self.send_with_reauth("PUT", &url, Some(&body)).await?;
        json_of::<Product>(response).await
    }

    // ------------------------------------------------------------------
    // Decorador de requests
    // ------------------------------------------------------------------

    async fn send_once(
        &self,
        method: &str,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let mut builder = request_builder(method, url).header("Accept", "application/json");

        if let Some(token) = self.session.get_access_token() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let result = match body {
            Some(json) => {
                builder
                    .json(json)
                    .map_err(|e| ApiError::Parse(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };

        result.map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Request autorizado con un único ciclo refresh+retry ante 401
    async fn send_with_reauth(
        &self,
        method: &str,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let response = self.send_once(method, url, body).await?;

        if response.status() != 401 {
            return Ok(response);
        }

        if self.session.get_refresh_token().is_none() {
            return Err(api_error_from(response).await);
        }

        let original_error = api_error_from_status(&response);
        match self.refresh_tokens().await {
            Ok(_) => {
                log::info!("🔁 Reintentando request original tras refresh");
                self.send_once(method, url, body).await
            }
            Err(refresh_error) => {
                // El 401 original se devuelve sin modificar
                log::warn!("⚠️ Refresh fallido: {}", refresh_error);
                Err(original_error)
            }
        }
    }
}

fn request_builder(method: &str, url: &str) -> RequestBuilder {
    match method {
        "POST" => Request::post(url),
        "PUT" => Request::put(url),
        _ => Request::get(url),
    }
}

/// Parsear el body como T; los status de error se clasifican antes
async fn json_of<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(api_error_from(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Clasificar una respuesta no-ok: si trae { message } es un error
/// estructurado de la API; si no, queda el status text
async fn api_error_from(response: Response) -> ApiError {
    let status = response.status();
    let fallback = response.status_text();
    match response.json::<ApiMessage>().await {
        Ok(body) => ApiError::Api {
            status,
            message: body.message,
        },
        Err(_) => ApiError::Api {
            status,
            message: fallback,
        },
    }
}

fn api_error_from_status(response: &Response) -> ApiError {
    ApiError::Api {
        status: response.status(),
        message: response.status_text(),
    }
}

/// Actualizar el refresh token persistido en el storage donde ya vivía.
/// Si no estaba persistido (login sin "recordarme" en esta pestaña y
/// sesión nueva), no se persiste nada.
fn persist_refresh_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        if let Ok(Some(_)) = storage.get_item(REFRESH_TOKEN_KEY) {
            let _ = storage.set_item(REFRESH_TOKEN_KEY, token);
            return;
        }
    }
    if let Some(storage) = get_session_storage() {
        if let Ok(Some(_)) = storage.get_item(REFRESH_TOKEN_KEY) {
            let _ = storage.set_item(REFRESH_TOKEN_KEY, token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_error_class_displays_its_own_message() {
        let api = ApiError::Api {
            status: 400,
            message: "Invalid credentials".into(),
        };
        assert_eq!(api.to_string(), "Invalid credentials");

        let network = ApiError::Network("Failed to fetch".into());
        assert_eq!(network.to_string(), "Network error: Failed to fetch");

        let parse = ApiError::Parse("missing field `id`".into());
        assert_eq!(parse.to_string(), "Parse error: missing field `id`");
    }
}
