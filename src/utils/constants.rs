/// URL base de la API remota
/// Configurada en tiempo de compilación:
/// - Por defecto: https://dummyjson.com
/// - Override via BACKEND_URL (ver build.rs / .env)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "https://dummyjson.com",
};

/// Minutos de validez solicitados para el access token
pub const TOKEN_EXPIRES_IN_MINS: u32 = 15;

/// Clave de storage del refresh token (localStorage o sessionStorage
/// según "recordarme")
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Quiet period del debounce del buscador, en milisegundos
pub const SEARCH_DEBOUNCE_MS: u32 = 400;

/// Milisegundos que un toast permanece visible
pub const TOAST_DURATION_MS: u32 = 3500;

/// Filas por página por defecto del listado de productos
pub const DEFAULT_PAGE_SIZE: u32 = 5;
