// ============================================================================
// SESSION STATE - Usuario autenticado + tokens (dueño único de la sesión)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::remove_raw;
use crate::models::User;
use crate::utils::REFRESH_TOKEN_KEY;

/// Estado de sesión: vacío al inicio, poblado por login o restauración,
/// limpiado por logout. El interceptor de refresh solo muta los tokens.
#[derive(Clone)]
pub struct SessionState {
    pub user: Rc<RefCell<Option<User>>>,
    pub access_token: Rc<RefCell<Option<String>>>,
    pub refresh_token: Rc<RefCell<Option<String>>>,
    /// Login en vuelo: bloquea re-submits del formulario
    pub is_authenticating: Rc<RefCell<bool>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            user: Rc::new(RefCell::new(None)),
            access_token: Rc::new(RefCell::new(None)),
            refresh_token: Rc::new(RefCell::new(None)),
            is_authenticating: Rc::new(RefCell::new(false)),
        }
    }

    /// Poblar la sesión con la respuesta de login (usuario + tokens)
    pub fn set_session(&self, user: User) {
        *self.access_token.borrow_mut() = user.access_token.clone();
        *self.refresh_token.borrow_mut() = user.refresh_token.clone();
        *self.user.borrow_mut() = Some(user);
    }

    /// Reemplazar solo el usuario (restauración via /auth/me)
    pub fn set_user(&self, user: User) {
        *self.user.borrow_mut() = Some(user);
    }

    /// Mutar solo los tokens (flujo de refresh)
    pub fn set_tokens(&self, access_token: String, refresh_token: String) {
        *self.access_token.borrow_mut() = Some(access_token);
        *self.refresh_token.borrow_mut() = Some(refresh_token);
    }

    pub fn get_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn get_access_token(&self) -> Option<String> {
        self.access_token.borrow().clone()
    }

    pub fn get_refresh_token(&self) -> Option<String> {
        self.refresh_token.borrow().clone()
    }

    /// El guard de rutas consulta este predicado
    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some() || self.access_token.borrow().is_some()
    }

    /// Logout explícito: limpia estado y el refresh token persistido
    pub fn clear(&self) {
        *self.user.borrow_mut() = None;
        *self.access_token.borrow_mut() = None;
        *self.refresh_token.borrow_mut() = None;
        remove_raw(REFRESH_TOKEN_KEY);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_flag_starts_cleared() {
        let state = SessionState::new();
        assert!(!*state.is_authenticating.borrow());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn tokens_alone_authenticate_the_session() {
        let state = SessionState::new();
        state.set_tokens("access".into(), "refresh".into());
        assert!(state.is_authenticated());
        assert_eq!(state.get_access_token().as_deref(), Some("access"));
    }
}
