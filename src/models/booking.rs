use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{id, Id};

/// Estado de una reserva en el backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "CONFIRMED")]
    Confirmed,
    #[serde(alias = "CANCELLED")]
    Cancelled,
}

impl BookingStatus {
    /// Etiqueta capitalizada ("Pending", "Confirmed"...)
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

/// Reserva tal como la devuelve el backend
///
/// El cliente nunca inventa un `id`: sólo refleja lo que devuelve el servidor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: Id,
    #[serde(deserialize_with = "id::deserialize")]
    pub restaurant_id: Id,
    /// Fecha y hora local, sin zona horaria
    pub date_time: NaiveDateTime,
    pub total_customers: u32,
    pub status: BookingStatus,
}

impl Booking {
    /// Fecha larga para mostrar, p. ej. "Monday, April 28, 2025"
    pub fn display_date(&self) -> String {
        self.date_time.format("%A, %B %-d, %Y").to_string()
    }

    /// Hora en formato 24h, p. ej. "17:30"
    pub fn display_time(&self) -> String {
        self.date_time.format("%H:%M").to_string()
    }
}
