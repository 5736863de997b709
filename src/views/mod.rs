//! # Vistas
//!
//! Controladores de las páginas del sitio, sin nada de presentación. Cada
//! vista recibe un [`ApiClient`](crate::api::ApiClient) y un
//! [`SessionReader`], pide sus datos al montarse y guarda el resultado en
//! un [`Loadable`].
//!
//! ## Lectura de lo propio
//!
//! Tras borrar, aprobar o rechazar con éxito, el elemento se quita de la
//! lista local y no se vuelve a pedir la lista. Esa lista local manda hasta
//! la siguiente carga completa. Si la operación falla, la lista no cambia.
//!
//! - [`home`] - Portada, búsqueda y detalle de restaurante
//! - [`reviews`] - Reseñas del usuario y publicación de reseñas
//! - [`profile`] - Perfil del usuario
//! - [`manager`] - Panel del gestor, mesas y formularios de restaurante
//! - [`admin`] - Aprobaciones, bajas y panel de analíticas

pub mod admin;
pub mod home;
pub mod manager;
pub mod profile;
pub mod reviews;

use crate::api::{ApiClient, ClientError, ClientResult};
use crate::models::{Role, Session};
use crate::session::SessionReader;

/// Texto del estado de carga de las vistas protegidas
pub const CHECKING_AUTHENTICATION: &str = "Checking authentication...";

/// Datos de una vista que se piden al backend
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Por qué una vista protegida no se carga
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// La sesión aún se está leyendo
    SessionLoading,
    /// Sin sesión o con otro rol; lleva el texto a mostrar
    Denied(String),
}

impl Gate {
    pub fn message(&self) -> &str {
        match self {
            Gate::SessionLoading => CHECKING_AUTHENTICATION,
            Gate::Denied(message) => message,
        }
    }
}

/// Devuelve la sesión si el usuario tiene `role`
///
/// No hace ninguna petición: las vistas lo llaman antes de tocar el backend.
pub fn require_role(session: &SessionReader, role: Role, denied: &str) -> Result<Session, Gate> {
    if session.is_loading() {
        return Err(Gate::SessionLoading);
    }
    match session.user() {
        Some(user) if user.has_role(role) => Ok(user),
        _ => Err(Gate::Denied(denied.to_string())),
    }
}

/// Como [`require_role`] pero vale cualquier usuario con sesión
pub fn require_user(session: &SessionReader, denied: &str) -> Result<Session, Gate> {
    if session.is_loading() {
        return Err(Gate::SessionLoading);
    }
    session.user().ok_or_else(|| Gate::Denied(denied.to_string()))
}

/// Cliente con el token de la sesión actual
///
/// Sin sesión devuelve un 401 local, que las vistas muestran como
/// "Please log in again to ...".
pub(crate) fn authed_api(api: &ApiClient, session: &SessionReader) -> ClientResult<ApiClient> {
    match session.user() {
        Some(user) => Ok(api.for_session(&user)),
        None => Err(ClientError::http("session", 401, None)),
    }
}

/// Quita de la lista el elemento con ese id. Devuelve si estaba.
pub(crate) fn remove_by_id<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &str) -> bool {
    let before = items.len();
    items.retain(|item| key(item) != id);
    items.len() != before
}
