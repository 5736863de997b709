//! # Módulo API
//!
//! Cliente tipado del backend REST de BookIt.
//!
//! ## Módulos principales
//!
//! - [`auth`] - Inicio de sesión y registro
//! - [`restaurant`] - Portada, búsqueda, detalle y horarios libres
//! - [`booking`] - Crear, confirmar y cancelar reservas
//! - [`review`] - Reseñas (publicar, listar, borrar)
//! - [`user`] - Perfil de usuario
//! - [`manager`] - Restaurantes y mesas del gestor
//! - [`admin`] - Aprobaciones, bajas y analíticas
//! - [`upload`] - Formularios multipart con imágenes
//! - [`errors`] - Manejo de errores del cliente
//!
//! Ninguna llamada tiene timeout ni reintentos: se lanza, se espera y el
//! resultado (o el error) vuelve a la vista que la hizo.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod errors;
pub mod manager;
pub mod middleware;
pub mod restaurant;
pub mod review;
pub mod upload;
pub mod user;

// Re-exportar tipos comunes para facilitar su uso
pub use errors::{ClientError, ClientResult, ErrorResponse, ResultExt};

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::models::Session;

/// Cliente del backend REST
///
/// Es barato de clonar (el `reqwest::Client` interno es un `Arc`). Cada
/// clon puede llevar su propio token: [`ApiClient::with_token`] no modifica
/// el original.
///
/// # Ejemplo
///
/// ```no_run
/// use bookit_web::api::ApiClient;
///
/// # async fn run() -> bookit_web::api::ClientResult<()> {
/// let api = ApiClient::new("http://localhost:8080/api")?;
/// let home = api.available_restaurants().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err_validation("URL base del backend inválida")?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::transport("build_http_client", e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::new(config.api_base_url.clone())
    }

    /// Copia del cliente que envía `Authorization: Bearer {token}`
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    /// Copia del cliente autenticada con el token de la sesión
    pub fn for_session(&self, session: &Session) -> Self {
        self.with_token(session.token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        middleware::decorate(builder, self.token.as_deref())
    }

    pub(crate) async fn send(
        &self,
        operation: &str,
        builder: RequestBuilder,
    ) -> ClientResult<reqwest::Response> {
        middleware::execute(&self.http, operation, builder).await
    }

    /// Ejecuta y decodifica el cuerpo JSON de la respuesta
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        builder: RequestBuilder,
    ) -> ClientResult<T> {
        let response = self.send(operation, builder).await?;
        response.json::<T>().await.map_err(|e| {
            let error = ClientError::Decode {
                operation: operation.to_string(),
                source: e,
            };
            error.log();
            error
        })
    }

    /// Ejecuta y descarta el cuerpo de la respuesta
    pub(crate) async fn send_empty(&self, operation: &str, builder: RequestBuilder) -> ClientResult<()> {
        self.send(operation, builder).await.map(|_| ())
    }
}
