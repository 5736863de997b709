//! # Flujo de reserva
//!
//! La página de reserva recibe `restaurantId`, `dateTime` y `people` en la
//! URL, crea una reserva `pending` nada más montarse y deja al usuario
//! confirmarla o cancelarla.
//!
//! - [`state`] - Máquina de estados pura (reductor)
//! - [`controller`] - Conecta el reductor con el backend y la sesión
//!
//! ```text
//! Idle ─▶ Creating ─┬─▶ Failed
//!                   └─▶ Pending ─▶ Confirming ─▶ Confirmed
//!            Pending | Confirmed ─▶ CancelPrompt ─▶ Cancelling ─▶ Cancelled
//! ```

pub mod controller;
pub mod state;

pub use controller::{BookingFlow, MountOutcome, LOGIN_REQUIRED};
pub use state::{BookingEvent, FlowState, InvalidTransition, Phase};

use chrono::NaiveDateTime;
use reqwest::Url;

use crate::api::ClientError;
use crate::models::Id;
use crate::routes::Route;

/// Mensaje cuando falta algún parámetro de la URL
pub const MISSING_PARAMETERS: &str = "Missing required parameters";
/// Centinela: la franja ya no está disponible
pub const TIME_SLOT_UNAVAILABLE: &str = "TIME_SLOT_UNAVAILABLE";
/// Mensaje genérico si el backend no explica el fallo
pub const CREATE_FAILED: &str = "Failed to create booking";
pub const CONFIRM_FAILED: &str = "Failed to confirm booking";
pub const CANCEL_FAILED: &str = "Failed to cancel booking";

/// Parámetros de la URL de la página de reserva
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingParams {
    pub restaurant_id: Id,
    /// Fecha y hora local, sin zona
    pub date_time: NaiveDateTime,
    pub people: u32,
}

impl BookingParams {
    /// Lee los parámetros de la query string
    ///
    /// Faltar cualquiera de los tres (o venir vacío) es
    /// [`MISSING_PARAMETERS`]; venir mal formado también, porque la página
    /// no puede hacer nada útil con él.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, CreateError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut restaurant_id = None;
        let mut date_time = None;
        let mut people = None;

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "restaurantId" => restaurant_id = Some(value.to_string()),
                "dateTime" => date_time = Some(value.to_string()),
                "people" => people = Some(value.to_string()),
                _ => {}
            }
        }

        let (Some(restaurant_id), Some(date_time), Some(people)) = (restaurant_id, date_time, people)
        else {
            return Err(CreateError::MissingParameters);
        };

        let date_time = parse_local_date_time(&date_time).ok_or(CreateError::MissingParameters)?;
        let people = people
            .parse::<u32>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or(CreateError::MissingParameters)?;

        Ok(Self {
            restaurant_id,
            date_time,
            people,
        })
    }

    /// Lee los parámetros de una URL completa de la página de reserva
    pub fn from_url(url: &Url) -> Result<Self, CreateError> {
        Self::from_pairs(url.query_pairs())
    }
}

/// Acepta `YYYY-MM-DDTHH:MM:SS` y `YYYY-MM-DDTHH:MM`
fn parse_local_date_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Por qué no se pudo crear la reserva
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateError {
    /// Faltan parámetros en la URL; no se hizo ninguna petición
    MissingParameters,
    /// HTTP 400 con "not available" en el mensaje
    TimeSlotUnavailable,
    /// Cualquier otro fallo, con el texto a mostrar
    Other(String),
}

impl CreateError {
    /// Clasifica el error devuelto por `POST /bookings/create`
    pub fn from_client_error(error: &ClientError) -> Self {
        if error.status() == Some(400)
            && error
                .server_message()
                .is_some_and(|m| m.contains("not available"))
        {
            return CreateError::TimeSlotUnavailable;
        }
        match error {
            ClientError::Transport { source, .. } => CreateError::Other(source.to_string()),
            _ => CreateError::Other(error.message_or(CREATE_FAILED)),
        }
    }

    /// Texto del estado de error (el centinela en el caso de franja ocupada)
    pub fn message(&self) -> &str {
        match self {
            CreateError::MissingParameters => MISSING_PARAMETERS,
            CreateError::TimeSlotUnavailable => TIME_SLOT_UNAVAILABLE,
            CreateError::Other(message) => message,
        }
    }

    /// Acción principal que se ofrece para salir del error
    pub fn recovery(&self, restaurant_id: Option<&str>) -> Recovery {
        match (self, restaurant_id) {
            (CreateError::TimeSlotUnavailable, Some(id)) => Recovery::ChooseAnotherTime(Route::Restaurant(id.to_string())),
            _ => Recovery::BackToHome(Route::Home),
        }
    }
}

/// Salida ofrecida desde el estado de error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// "Choose Another Time": volver a la ficha del restaurante
    ChooseAnotherTime(Route),
    /// "Back to Home"
    BackToHome(Route),
}

impl Recovery {
    pub fn route(&self) -> &Route {
        match self {
            Recovery::ChooseAnotherTime(route) | Recovery::BackToHome(route) => route,
        }
    }
}
