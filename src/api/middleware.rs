//! # Capa intermedia de las peticiones salientes
//!
//! Todo lo que se aplica a cada llamada al backend, sea cual sea el recurso:
//! cabecera `Authorization`, `X-Request-Id`, traza de la petición y
//! conversión de respuestas no exitosas en [`ClientError`].

use std::error::Error as StdError;

use reqwest::{RequestBuilder, Response};
use tracing::Instrument;

use super::{ClientError, ClientResult, ErrorResponse};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Añade el token Bearer (si hay) y un identificador de petición
pub fn decorate(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    let builder = builder.header(REQUEST_ID_HEADER, uuid::Uuid::new_v4().to_string());
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Ejecuta la petición y comprueba el estado de la respuesta
///
/// Las respuestas 2xx se devuelven intactas. Para el resto se intenta leer el
/// cuerpo como [`ErrorResponse`] y se construye un [`ClientError::Http`] con
/// su campo `message` (o `error` si no hay `message`).
pub async fn execute(
    http: &reqwest::Client,
    operation: &str,
    builder: RequestBuilder,
) -> ClientResult<Response> {
    let request = builder
        .build()
        .map_err(|e| ClientError::transport(operation, e))?;

    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let span = tracing::debug_span!("api_request", operation = %operation, request_id = %request_id);

    async move {
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending API request");

        let response = http
            .execute(request)
            .await
            .log_error_context(operation)
            .map_err(|e| ClientError::transport(operation, e))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = %status.as_u16(), "API request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message.or(e.error));

        let error = ClientError::http(operation, status.as_u16(), message);
        error.log();
        Err(error)
    }
    .instrument(span)
    .await
}

/// Registra un error junto con todas sus causas (`source()`)
pub fn log_error_chain<E>(error: &E, operation: Option<&str>)
where
    E: StdError + 'static,
{
    let mut causes = Vec::new();
    let mut current: Option<&dyn StdError> = Some(error);
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }

    match operation {
        Some(operation) => tracing::error!(operation = %operation, causes = ?causes, "Client call failed"),
        None => tracing::error!(causes = ?causes, "Client call failed"),
    }
}

/// Registra el error de un `Result` sin consumirlo
///
/// ```ignore
/// http.execute(request).await.log_error_context("create_booking")?;
/// ```
pub trait ErrorLogExt<T, E> {
    fn log_error_context(self, operation: &str) -> Result<T, E>;
}

impl<T, E> ErrorLogExt<T, E> for Result<T, E>
where
    E: StdError + 'static,
{
    fn log_error_context(self, operation: &str) -> Result<T, E> {
        if let Err(error) = &self {
            log_error_chain(error, Some(operation));
        }
        self
    }
}
