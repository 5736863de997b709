//! Reductor del flujo de reserva.
//!
//! Es puro: no hace peticiones ni lee la sesión. Que la reserva se cree
//! una sola vez por montaje sale de aquí: `Start` sólo se acepta desde
//! `Idle`, y a `Idle` no se vuelve nunca.

use thiserror::Error;

use super::CreateError;
use crate::models::{Booking, BookingStatus};
use crate::routes::Redirect;

/// Qué está haciendo el usuario con una reserva ya creada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Viewing,
    Confirming,
    /// Modal "Ask for Cancellation Confirmation" abierto
    CancelPrompt,
    Cancelling,
}

/// Reserva creada y lo que se está haciendo con ella
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveBooking {
    /// Último estado conocido según el servidor
    pub booking: Booking,
    pub activity: Activity,
    /// Error de la última confirmación/cancelación fallida
    pub error: Option<String>,
    /// Redirección programada tras confirmar
    pub redirect: Option<Redirect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Montado, esperando a que haya sesión
    Idle,
    Creating,
    Failed(CreateError),
    Active(ActiveBooking),
    /// Modal "Booking Cancelled" con la vuelta a la portada programada
    Cancelled { booking: Booking, redirect: Redirect },
}

/// Fase visible, aplanada para la vista y las pruebas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Creating,
    Error,
    Pending,
    Confirming,
    Confirmed,
    CancelPrompt,
    Cancelling,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    Start,
    Created(Booking),
    CreateFailed(CreateError),
    ConfirmRequested,
    ConfirmSucceeded { booking: Booking, redirect: Redirect },
    ConfirmFailed(String),
    CancelRequested,
    CancelDismissed,
    CancelConfirmed,
    CancelSucceeded { redirect: Redirect },
    CancelFailed(String),
}

impl BookingEvent {
    fn name(&self) -> &'static str {
        match self {
            BookingEvent::Start => "Start",
            BookingEvent::Created(_) => "Created",
            BookingEvent::CreateFailed(_) => "CreateFailed",
            BookingEvent::ConfirmRequested => "ConfirmRequested",
            BookingEvent::ConfirmSucceeded { .. } => "ConfirmSucceeded",
            BookingEvent::ConfirmFailed(_) => "ConfirmFailed",
            BookingEvent::CancelRequested => "CancelRequested",
            BookingEvent::CancelDismissed => "CancelDismissed",
            BookingEvent::CancelConfirmed => "CancelConfirmed",
            BookingEvent::CancelSucceeded { .. } => "CancelSucceeded",
            BookingEvent::CancelFailed(_) => "CancelFailed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transición inválida: evento '{event}' en fase {phase:?}")]
pub struct InvalidTransition {
    pub phase: Phase,
    pub event: &'static str,
}

impl FlowState {
    pub fn phase(&self) -> Phase {
        match self {
            FlowState::Idle => Phase::Idle,
            FlowState::Creating => Phase::Creating,
            FlowState::Failed(_) => Phase::Error,
            FlowState::Cancelled { .. } => Phase::Cancelled,
            FlowState::Active(active) => match active.activity {
                Activity::Confirming => Phase::Confirming,
                Activity::CancelPrompt => Phase::CancelPrompt,
                Activity::Cancelling => Phase::Cancelling,
                Activity::Viewing => match active.booking.status {
                    BookingStatus::Pending => Phase::Pending,
                    BookingStatus::Confirmed => Phase::Confirmed,
                    BookingStatus::Cancelled => Phase::Cancelled,
                },
            },
        }
    }

    pub fn booking(&self) -> Option<&Booking> {
        match self {
            FlowState::Active(active) => Some(&active.booking),
            FlowState::Cancelled { booking, .. } => Some(booking),
            _ => None,
        }
    }

    /// Texto del error visible, si lo hay
    pub fn error(&self) -> Option<&str> {
        match self {
            FlowState::Failed(error) => Some(error.message()),
            FlowState::Active(active) => active.error.as_deref(),
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            FlowState::Active(active) => active.redirect.as_ref(),
            FlowState::Cancelled { redirect, .. } => Some(redirect),
            _ => None,
        }
    }

    /// El botón "Confirm Booking" sólo existe para reservas `pending`
    pub fn can_confirm(&self) -> bool {
        matches!(
            self,
            FlowState::Active(ActiveBooking { activity: Activity::Viewing, booking, .. })
                if booking.status == BookingStatus::Pending
        )
    }

    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            FlowState::Active(ActiveBooking { activity: Activity::Viewing, booking, .. })
                if matches!(booking.status, BookingStatus::Pending | BookingStatus::Confirmed)
        )
    }

    /// Calcula el siguiente estado. Si el evento no aplica, el estado
    /// actual no cambia y se devuelve [`InvalidTransition`].
    pub fn reduce(&self, event: BookingEvent) -> Result<FlowState, InvalidTransition> {
        let invalid = InvalidTransition {
            phase: self.phase(),
            event: event.name(),
        };

        let next = match (self, event) {
            (FlowState::Idle, BookingEvent::Start) => FlowState::Creating,

            (FlowState::Creating, BookingEvent::Created(booking)) => FlowState::Active(ActiveBooking {
                booking,
                activity: Activity::Viewing,
                error: None,
                redirect: None,
            }),
            (FlowState::Creating, BookingEvent::CreateFailed(error)) => FlowState::Failed(error),

            (FlowState::Active(active), BookingEvent::ConfirmRequested) if self.can_confirm() => {
                FlowState::Active(ActiveBooking {
                    activity: Activity::Confirming,
                    error: None,
                    ..active.clone()
                })
            }
            (
                FlowState::Active(ActiveBooking { activity: Activity::Confirming, .. }),
                BookingEvent::ConfirmSucceeded { booking, redirect },
            ) => FlowState::Active(ActiveBooking {
                booking,
                activity: Activity::Viewing,
                error: None,
                redirect: Some(redirect),
            }),
            (
                FlowState::Active(active @ ActiveBooking { activity: Activity::Confirming, .. }),
                BookingEvent::ConfirmFailed(message),
            ) => FlowState::Active(ActiveBooking {
                activity: Activity::Viewing,
                error: Some(message),
                ..active.clone()
            }),

            (FlowState::Active(active), BookingEvent::CancelRequested) if self.can_cancel() => {
                FlowState::Active(ActiveBooking {
                    activity: Activity::CancelPrompt,
                    ..active.clone()
                })
            }
            (
                FlowState::Active(active @ ActiveBooking { activity: Activity::CancelPrompt, .. }),
                BookingEvent::CancelDismissed,
            ) => FlowState::Active(ActiveBooking {
                activity: Activity::Viewing,
                ..active.clone()
            }),
            (
                FlowState::Active(active @ ActiveBooking { activity: Activity::CancelPrompt, .. }),
                BookingEvent::CancelConfirmed,
            ) => FlowState::Active(ActiveBooking {
                activity: Activity::Cancelling,
                error: None,
                ..active.clone()
            }),
            (
                FlowState::Active(ActiveBooking { activity: Activity::Cancelling, booking, .. }),
                BookingEvent::CancelSucceeded { redirect },
            ) => FlowState::Cancelled {
                booking: booking.clone(),
                redirect,
            },
            (
                FlowState::Active(active @ ActiveBooking { activity: Activity::Cancelling, .. }),
                BookingEvent::CancelFailed(message),
            ) => FlowState::Active(ActiveBooking {
                activity: Activity::Viewing,
                error: Some(message),
                ..active.clone()
            }),

            _ => return Err(invalid),
        };

        Ok(next)
    }
}
