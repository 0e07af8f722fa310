// ============================================================================
// SERVICES MODULE - Comunicación con el backend
// ============================================================================

pub mod api_client;

pub use api_client::*;
