// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod product_state;
pub mod session_state;
pub mod table_state;

pub use app_state::*;
pub use product_state::*;
pub use session_state::*;
pub use table_state::*;
