//! # API de reservas
//!
//! - `POST /bookings/create` crea una reserva `pending`
//! - `PUT /bookings/{id}/confirm?type=EMAIL` la confirma y avisa por email
//! - `DELETE /bookings/{id}` la cancela
//!
//! La disponibilidad de la franja la decide el backend; el cliente sólo
//! interpreta la respuesta (ver [`crate::booking`]).

use chrono::NaiveDateTime;
use reqwest::Method;

use super::{ApiClient, ClientResult};
use crate::models::Booking;

/// Datos para crear una reserva, todos van en la query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBooking {
    pub restaurant_id: String,
    pub user_id: String,
    pub date_time: NaiveDateTime,
    pub people: u32,
}

impl ApiClient {
    pub async fn create_booking(&self, request: &CreateBooking) -> ClientResult<Booking> {
        let builder = self.request(Method::POST, "/bookings/create").query(&[
            ("restaurantId", request.restaurant_id.clone()),
            ("userId", request.user_id.clone()),
            ("dateTime", request.date_time.format("%Y-%m-%dT%H:%M:%S").to_string()),
            ("people", request.people.to_string()),
        ]);

        let booking: Booking = self.send_json("create_booking", builder).await?;
        tracing::info!(
            booking_id = %booking.id,
            restaurant_id = %booking.restaurant_id,
            status = ?booking.status,
            "Reserva creada"
        );
        Ok(booking)
    }

    /// Confirma la reserva; el backend devuelve la reserva actualizada
    pub async fn confirm_booking(&self, booking_id: &str) -> ClientResult<Booking> {
        let builder = self
            .request(Method::PUT, &format!("/bookings/{}/confirm", booking_id))
            .query(&[("type", "EMAIL")]);
        self.send_json("confirm_booking", builder).await
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> ClientResult<()> {
        let builder = self.request(Method::DELETE, &format!("/bookings/{}", booking_id));
        self.send_empty("cancel_booking", builder).await
    }
}
