//! # Manejo de errores del cliente
//!
//! Todos los fallos del cliente (red, backend, almacenamiento local,
//! validación de formularios) se reúnen en [`ClientError`]. Las vistas nunca
//! propagan estos errores hacia arriba: los convierten en un mensaje legible
//! con [`ClientError::user_message`] y lo muestran en línea.

use thiserror::Error;

/// Tipos de error del cliente con contexto
#[derive(Error, Debug)]
pub enum ClientError {
    /// Error de transporte (DNS, conexión rechazada, TLS...)
    #[error("Error de red en operación '{operation}': {source}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// El backend respondió con un estado distinto de 2xx
    #[error("El backend respondió {status} en '{operation}': {}", .message.as_deref().unwrap_or("sin mensaje"))]
    Http {
        operation: String,
        status: u16,
        /// Campo `message` del cuerpo de error, si lo había
        message: Option<String>,
    },

    /// La respuesta no tenía el formato esperado
    #[error("Respuesta inválida en operación '{operation}': {source}")]
    Decode {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// Error leyendo o escribiendo el almacenamiento local
    #[error("Error de almacenamiento local en '{operation}': {source}")]
    Storage {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Error de serialización JSON
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error de validación con campo específico
    #[error("Error de validación en campo '{field}': {message}")]
    ValidationWithField {
        field: String,
        message: String,
    },

    /// Error de validación general. El texto se muestra tal cual al usuario.
    #[error("{0}")]
    Validation(String),

    /// Configuración inválida (URL base mal formada, etc.)
    #[error("Error de configuración: {0}")]
    Config(String),

    /// Error interno con código de rastreo
    #[error("Error interno (trace: {trace_id}): {message}")]
    InternalWithTrace {
        trace_id: String,
        message: String,
    },
}

impl ClientError {
    /// Crea un error de transporte con contexto de operación
    pub fn transport(operation: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            operation: operation.to_string(),
            source,
        }
    }

    /// Crea un error HTTP a partir del estado y del mensaje del backend
    pub fn http(operation: &str, status: u16, message: Option<String>) -> Self {
        Self::Http {
            operation: operation.to_string(),
            status,
            message,
        }
    }

    /// Crea un error de almacenamiento local con contexto de operación
    pub fn storage(operation: &str, source: std::io::Error) -> Self {
        Self::Storage {
            operation: operation.to_string(),
            source,
        }
    }

    /// Crea un error de validación con campo específico
    pub fn validation_field(field: &str, message: &str) -> Self {
        Self::ValidationWithField {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Crea un error interno con trace ID
    pub fn internal_trace(message: &str, trace_id: Option<String>) -> Self {
        Self::InternalWithTrace {
            trace_id: trace_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            message: message.to_string(),
        }
    }

    /// Estado HTTP, sólo para errores devueltos por el backend
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Campo `message` del cuerpo de error del backend
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Convierte el error en el texto que ve el usuario
    ///
    /// Un 401 se traduce siempre a "Please log in again to {action}"; el resto
    /// de fallos usa `fallback`, sin exponer detalles internos.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use bookit_web::api::ClientError;
    ///
    /// let err = ClientError::http("list_pending", 401, None);
    /// assert_eq!(
    ///     err.user_message("view pending restaurants", "Failed to fetch pending restaurants"),
    ///     "Please log in again to view pending restaurants"
    /// );
    /// ```
    pub fn user_message(&self, action: &str, fallback: &str) -> String {
        if self.is_unauthorized() {
            format!("Please log in again to {}", action)
        } else {
            fallback.to_string()
        }
    }

    /// Mensaje del backend si lo hay, o `fallback` en caso contrario.
    /// Los errores de validación local se devuelven tal cual.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Registra el error con el nivel adecuado antes de mostrarlo
    pub fn log(&self) {
        match self {
            Self::Http { operation, status, message } if *status < 500 => {
                tracing::warn!(
                    operation = %operation,
                    status = %status,
                    message = ?message,
                    "Backend rejected request"
                );
            }
            Self::Validation(message) => {
                tracing::debug!(message = %message, "Validation error");
            }
            Self::ValidationWithField { field, message } => {
                tracing::debug!(field = %field, message = %message, "Validation error");
            }
            error => super::middleware::log_error_chain(error, None),
        }
    }
}

/// Cuerpo de error que devuelve el backend
#[derive(Debug, Default, serde::Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> Self {
        Self::Storage {
            operation: "local_storage".to_string(),
            source: error,
        }
    }
}

pub trait ResultExt<T> {
    fn map_err_validation(self, message: &str) -> ClientResult<T>;
    fn map_err_internal(self, message: &str) -> ClientResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + 'static,
{
    fn map_err_validation(self, message: &str) -> ClientResult<T> {
        self.map_err(|e| ClientError::Validation(format!("{}: {}", message, e)))
    }

    fn map_err_internal(self, message: &str) -> ClientResult<T> {
        self.map_err(|e| ClientError::internal_trace(&format!("{}: {}", message, e), None))
    }
}
