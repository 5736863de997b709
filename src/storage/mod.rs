//! # Almacenamiento local
//!
//! Equivalente al `localStorage` del navegador: un mapa texto → texto que
//! sobrevive a recargas. Todo el estado persistido del cliente son dos
//! claves, [`TOKEN_KEY`] y [`USER_KEY`].
//!
//! - [`FileStorage`] guarda el mapa en un fichero JSON
//! - [`MemoryStorage`] lo guarda en memoria (pruebas, sesiones efímeras)

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::api::ClientResult;

/// Token Bearer en bruto
pub const TOKEN_KEY: &str = "token";
/// Sesión serializada como JSON
pub const USER_KEY: &str = "user";

/// Almacén clave/valor síncrono
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove_item(&self, key: &str) -> ClientResult<()>;
}
