use serde::{Deserialize, Serialize};

use super::{id, or_default, Id};
use crate::routes::Route;

/// Rol del usuario tal como lo envía el backend (`ROLE_*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_CUSTOMER")]
    Customer,
    #[serde(rename = "ROLE_MANAGER")]
    Manager,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Página a la que se redirige tras iniciar sesión
    pub fn landing_route(self) -> Route {
        match self {
            Role::Admin => Route::Admin,
            Role::Manager => Route::Manager,
            Role::Customer => Route::Home,
        }
    }
}

/// Sesión del usuario: la respuesta de `/auth/signin` tal cual
///
/// Es exactamente lo que se persiste bajo la clave `user` del
/// almacenamiento local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "id", deserialize_with = "id::deserialize")]
    pub user_id: Id,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role: Role,
    pub token: String,
}

impl Session {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Datos de perfil de `/users/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(deserialize_with = "or_default::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub phone_number: String,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub email: String,
}
