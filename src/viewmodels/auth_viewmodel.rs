// ============================================================================
// AUTH VIEWMODEL - Lógica de negocio de autenticación
// ============================================================================
// El formulario pide email, pero la API autentica por username: el
// email se resuelve contra el mapa estático conocido y si no aparece
// se envía tal cual (la API lo rechazará con su propio mensaje).
// ============================================================================

use wasm_bindgen_futures::spawn_local;

use crate::dom::{load_raw, remove_raw, save_raw};
use crate::models::LoginRequest;
use crate::services::{ApiClient, ApiError};
use crate::state::{navigate, AppState, Route};
use crate::utils::{login_for_email, t, REFRESH_TOKEN_KEY, TOKEN_EXPIRES_IN_MINS};

#[derive(Clone)]
pub struct AuthViewModel {
    state: AppState,
    api: ApiClient,
}

impl AuthViewModel {
    pub fn new(state: AppState) -> Self {
        let api = ApiClient::new(state.session.clone());
        Self { state, api }
    }

    /// Login con email + password. "remember" decide si el refresh
    /// token sobrevive al cierre del navegador. Con un login en vuelo
    /// los submits extra se ignoran.
    pub fn login(&self, email: String, password: String, remember: bool) {
        if *self.state.session.is_authenticating.borrow() {
            return;
        }
        *self.state.session.is_authenticating.borrow_mut() = true;

        let username = login_for_email(email.trim()).to_string();
        let vm = self.clone();
        crate::rerender_app();

        spawn_local(async move {
            let request = LoginRequest {
                username,
                password,
                expires_in_mins: TOKEN_EXPIRES_IN_MINS,
            };

            match vm.api.login(&request).await {
                Ok(user) => {
                    log::info!("✅ [LOGIN] Sesión iniciada: {}", user.username);

                    if let Some(refresh_token) = &user.refresh_token {
                        // Un solo slot de storage a la vez
                        remove_raw(REFRESH_TOKEN_KEY);
                        let _ = save_raw(REFRESH_TOKEN_KEY, refresh_token, remember);
                    }
                    vm.state.session.set_session(user);

                    let lang = vm.state.language();
                    vm.state.toast_success(t(&lang, "welcome"));
                    navigate(&Route::Products);
                }
                Err(error) => {
                    log::warn!("❌ [LOGIN] Falló: {}", error);
                    vm.toast_auth_error(&error);
                }
            }
            *vm.state.session.is_authenticating.borrow_mut() = false;
            crate::rerender_app();
        });
    }

    /// Restauración de sesión al arrancar: si hay refresh token
    /// persistido se canjea por tokens nuevos y se recupera el perfil.
    /// Falla en silencio (el usuario simplemente ve el login).
    pub fn restore_session(&self) {
        let Some(stored_token) = load_raw(REFRESH_TOKEN_KEY) else {
            return;
        };

        log::info!("🔐 Refresh token persistido encontrado, restaurando sesión...");
        *self.state.session.refresh_token.borrow_mut() = Some(stored_token);

        let vm = self.clone();
        spawn_local(async move {
            let restored = async {
                vm.api.refresh_tokens().await?;
                vm.api.me().await
            }
            .await;

            match restored {
                Ok(user) => {
                    log::info!("✅ Sesión restaurada: {}", user.username);
                    vm.state.session.set_user(user);
                }
                Err(error) => {
                    log::warn!("⚠️ No se pudo restaurar la sesión: {}", error);
                    vm.state.session.clear();
                }
            }
            crate::rerender_app();
        });
    }

    /// Logout: limpia sesión y storage, vuelve al login
    pub fn logout(&self) {
        log::info!("👋 [LOGOUT] Cerrando sesión");
        self.state.session.clear();
        navigate(&Route::Login);
        crate::rerender_app();
    }

    /// Clasificar el error para el toast: los errores de la API traen
    /// mensaje propio (p. ej. credenciales inválidas); red y parseo
    /// muestran su propio mensaje; solo un error de API sin mensaje
    /// cae al genérico localizado.
    fn toast_auth_error(&self, error: &ApiError) {
        let lang = self.state.language();
        let text = match error {
            ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Api { .. } => t(&lang, "system_error"),
            other => other.to_string(),
        };
        self.state.toast_error(text);
    }
}
