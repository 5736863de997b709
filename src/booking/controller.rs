//! Controlador de la página de reserva: lleva el reductor, el backend y
//! la sesión.

use std::time::Duration;

use reqwest::Url;

use super::state::{BookingEvent, FlowState, InvalidTransition, Phase};
use super::{BookingParams, CreateError, CANCEL_FAILED, CONFIRM_FAILED};
use crate::api::booking::CreateBooking;
use crate::api::ApiClient;
use crate::routes::Redirect;
use crate::session::SessionReader;

/// Texto mientras no hay usuario con sesión
pub const LOGIN_REQUIRED: &str = "Please Login for Booking";

/// Resultado de [`BookingFlow::mount`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// Sesión cargando o anónima: no se ha lanzado nada
    AwaitingSession,
    /// Ya se intentó crear la reserva en este montaje
    AlreadyStarted,
    /// Se intentó crear; fase resultante (`Pending`, `Confirmed` o `Error`)
    Finished(Phase),
}

pub struct BookingFlow {
    api: ApiClient,
    session: SessionReader,
    params: Result<BookingParams, CreateError>,
    redirect_delay: Duration,
    state: FlowState,
}

impl BookingFlow {
    pub fn new(
        api: ApiClient,
        session: SessionReader,
        params: Result<BookingParams, CreateError>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            api,
            session,
            params,
            redirect_delay,
            state: FlowState::Idle,
        }
    }

    /// Monta la página a partir de su URL
    pub fn from_url(api: ApiClient, session: SessionReader, url: &Url, redirect_delay: Duration) -> Self {
        Self::new(api, session, BookingParams::from_url(url), redirect_delay)
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Aviso a mostrar en lugar de la reserva
    ///
    /// Mientras la sesión carga no se muestra nada; sin usuario, se pide
    /// iniciar sesión.
    pub fn login_prompt(&self) -> Option<&'static str> {
        if self.session.is_loading() || self.session.is_logged_in() {
            None
        } else {
            Some(LOGIN_REQUIRED)
        }
    }

    /// Id del restaurante de la URL, para "Choose Another Time"
    pub fn restaurant_id(&self) -> Option<&str> {
        self.params.as_ref().ok().map(|p| p.restaurant_id.as_str())
    }

    /// Intenta crear la reserva
    ///
    /// Sin usuario con sesión no hace nada y se puede volver a llamar cuando
    /// la sesión cambie. Con usuario, sólo el primer montaje llega al
    /// backend; si faltan parámetros falla sin hacer ninguna petición.
    pub async fn mount(&mut self) -> MountOutcome {
        let Some(user) = self.session.user() else {
            tracing::debug!(loading = self.session.is_loading(), "Reserva en espera de sesión");
            return MountOutcome::AwaitingSession;
        };

        if self.dispatch(BookingEvent::Start).is_err() {
            return MountOutcome::AlreadyStarted;
        }

        let event = match &self.params {
            Err(error) => {
                tracing::warn!(error = error.message(), "Parámetros de reserva incompletos");
                BookingEvent::CreateFailed(error.clone())
            }
            Ok(params) => {
                let request = CreateBooking {
                    restaurant_id: params.restaurant_id.clone(),
                    user_id: user.user_id.clone(),
                    date_time: params.date_time,
                    people: params.people,
                };
                match self.api.for_session(&user).create_booking(&request).await {
                    Ok(booking) => BookingEvent::Created(booking),
                    Err(e) => BookingEvent::CreateFailed(CreateError::from_client_error(&e)),
                }
            }
        };

        // Creating acepta ambos eventos
        let _ = self.dispatch(event);
        MountOutcome::Finished(self.phase())
    }

    /// Espera a que la sesión se resuelva y monta
    pub async fn mount_when_ready(&mut self) -> MountOutcome {
        self.session.resolved().await;
        self.mount().await
    }

    /// Confirma la reserva `pending`
    ///
    /// Si sale bien la reserva pasa a ser la que devuelve el servidor y se
    /// programa la vuelta a la portada.
    pub async fn confirm(&mut self) -> Result<Phase, InvalidTransition> {
        self.dispatch(BookingEvent::ConfirmRequested)?;
        let booking_id = self.booking_id()?;

        let event = match self.authed_api().confirm_booking(&booking_id).await {
            Ok(booking) => {
                tracing::info!(booking_id = %booking.id, status = ?booking.status, "Reserva confirmada");
                BookingEvent::ConfirmSucceeded {
                    booking,
                    redirect: Redirect::home_after(self.redirect_delay),
                }
            }
            Err(_) => BookingEvent::ConfirmFailed(CONFIRM_FAILED.to_string()),
        };

        self.dispatch(event)?;
        Ok(self.phase())
    }

    /// Abre el modal de confirmación de cancelación
    pub fn request_cancel(&mut self) -> Result<Phase, InvalidTransition> {
        self.dispatch(BookingEvent::CancelRequested)?;
        Ok(self.phase())
    }

    /// "Keep Booking"
    pub fn dismiss_cancel(&mut self) -> Result<Phase, InvalidTransition> {
        self.dispatch(BookingEvent::CancelDismissed)?;
        Ok(self.phase())
    }

    /// "Yes, Cancel": borra la reserva en el backend
    pub async fn confirm_cancel(&mut self) -> Result<Phase, InvalidTransition> {
        self.dispatch(BookingEvent::CancelConfirmed)?;
        let booking_id = self.booking_id()?;

        let event = match self.authed_api().cancel_booking(&booking_id).await {
            Ok(()) => {
                tracing::info!(booking_id = %booking_id, "Reserva cancelada");
                BookingEvent::CancelSucceeded {
                    redirect: Redirect::home_after(self.redirect_delay),
                }
            }
            Err(_) => BookingEvent::CancelFailed(CANCEL_FAILED.to_string()),
        };

        self.dispatch(event)?;
        Ok(self.phase())
    }

    fn dispatch(&mut self, event: BookingEvent) -> Result<(), InvalidTransition> {
        match self.state.reduce(event) {
            Ok(next) => {
                tracing::debug!(from = ?self.state.phase(), to = ?next.phase(), "Transición de reserva");
                self.state = next;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Evento de reserva ignorado");
                Err(e)
            }
        }
    }

    fn booking_id(&self) -> Result<String, InvalidTransition> {
        self.state
            .booking()
            .map(|b| b.id.clone())
            .ok_or(InvalidTransition {
                phase: self.phase(),
                event: "booking_id",
            })
    }

    fn authed_api(&self) -> ApiClient {
        match self.session.user() {
            Some(user) => self.api.for_session(&user),
            None => self.api.clone(),
        }
    }
}
