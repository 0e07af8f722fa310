// ============================================================================
// DOM MODULE - Helpers para manipulación DOM y persistencia en storage
// ============================================================================

pub mod builder;
pub mod element;
pub mod events;

pub use builder::*;
pub use element::*;
pub use events::*;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::Storage;
pub use web_sys::window;

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

pub fn get_session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

pub fn save_to_storage<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Error serializando datos: {}", e))?;
    storage
        .set_item(key, &json)
        .map_err(|_| "Error guardando en localStorage".to_string())?;
    Ok(())
}

pub fn load_from_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = get_local_storage()?;
    let json = storage.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

pub fn remove_from_storage(key: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .remove_item(key)
        .map_err(|_| "Error eliminando de localStorage".to_string())?;
    Ok(())
}

/// Guardar un string plano en localStorage o sessionStorage.
/// "remember me" decide el storage: localStorage sobrevive al cierre
/// del navegador, sessionStorage solo a la pestaña.
pub fn save_raw(key: &str, value: &str, durable: bool) -> Result<(), String> {
    let storage = if durable {
        get_local_storage()
    } else {
        get_session_storage()
    }
    .ok_or("No se pudo acceder al storage")?;
    storage
        .set_item(key, value)
        .map_err(|_| "Error guardando en storage".to_string())
}

/// Leer un string plano buscando primero en localStorage y luego en
/// sessionStorage (mismo orden que la restauración de sesión)
pub fn load_raw(key: &str) -> Option<String> {
    if let Some(value) = get_local_storage().and_then(|s| s.get_item(key).ok().flatten()) {
        return Some(value);
    }
    get_session_storage().and_then(|s| s.get_item(key).ok().flatten())
}

/// Eliminar una clave de ambos storages
pub fn remove_raw(key: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(key);
    }
    if let Some(storage) = get_session_storage() {
        let _ = storage.remove_item(key);
    }
}
