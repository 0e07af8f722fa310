// ============================================================================
// VIEWMODELS MODULE - Lógica de negocio entre vistas y servicios
// ============================================================================

pub mod auth_viewmodel;
pub mod product_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use product_viewmodel::ProductViewModel;
