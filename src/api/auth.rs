//! # API de autenticación
//!
//! - `POST /auth/signin` devuelve la sesión completa (con token)
//! - `POST /auth/signup` sólo crea la cuenta; después hay que iniciar sesión

use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ClientResult};
use crate::models::{Role, Session};

#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl ApiClient {
    /// Inicia sesión con email (o teléfono) y contraseña
    ///
    /// # Errores
    /// - `401`/`400`: credenciales incorrectas; el mensaje del backend va en
    ///   [`ClientError::server_message`](super::ClientError::server_message)
    pub async fn sign_in(&self, request: &SignInRequest) -> ClientResult<Session> {
        let builder = self.request(Method::POST, "/auth/signin").json(request);
        self.send_json("sign_in", builder).await
    }

    pub async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<()> {
        let builder = self.request(Method::POST, "/auth/signup").json(request);
        self.send_empty("sign_up", builder).await
    }
}
