// ============================================================================
// VIEWS MODULE - Renderizado DOM de cada pantalla
// ============================================================================

pub mod add_row;
pub mod login;
pub mod not_found;
pub mod pagination;
pub mod products;
pub mod table;
pub mod toast;

pub use login::render_login;
pub use not_found::render_not_found;
pub use products::render_products;
pub use toast::render_toasts;
