// ============================================================================
// MODELS - Estructuras compartidas con la API remota
// ============================================================================

pub mod product;
pub mod user;

pub use product::{Product, ProductQuery, ProductsResponse, SortDirection};
pub use user::{LoginRequest, RefreshRequest, RefreshResponse, User};
