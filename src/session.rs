//! # Sesión del usuario
//!
//! [`SessionStore`] es el único escritor del estado de sesión; el resto del
//! cliente recibe un [`SessionReader`] (se inyecta, no hay estado global).
//!
//! ## Ciclo de vida
//!
//! ```text
//! Loading ──restore()──▶ Anonymous ◀──logout()── Authenticated
//!                    └─▶ Authenticated ◀──login()──┘
//! ```
//!
//! Mientras el estado sea `Loading` las vistas protegidas no deben decidir
//! nada (ni mostrar "inicia sesión" ni lanzar peticiones).

use tokio::sync::watch;

use crate::api::ClientResult;
use crate::models::{Role, Session};
use crate::routes::Route;
use crate::storage::{LocalStorage, TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Aún no se ha leído el almacenamiento local
    Loading,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn user(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Escritor único de la sesión, persistida en `token` y `user`
pub struct SessionStore<S: LocalStorage> {
    storage: S,
    tx: watch::Sender<SessionState>,
}

impl<S: LocalStorage> SessionStore<S> {
    /// Crea el almacén en estado `Loading`. Hay que llamar a [`restore`](Self::restore).
    pub fn new(storage: S) -> Self {
        let (tx, _rx) = watch::channel(SessionState::Loading);
        Self { storage, tx }
    }

    /// Atajo: crea el almacén y restaura la sesión persistida
    pub fn restored(storage: S) -> Self {
        let store = Self::new(storage);
        store.restore();
        store
    }

    /// Lee la sesión persistida, una sola vez
    ///
    /// Si ya se resolvió antes, devuelve el estado actual sin volver a leer.
    /// Un valor `user` ilegible se registra y se trata como anónimo.
    pub fn restore(&self) -> SessionState {
        if *self.tx.borrow() != SessionState::Loading {
            return self.state();
        }

        let restored = match self.storage.get_item(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    tracing::info!(
                        user_id = %session.user_id,
                        role = ?session.role,
                        "Sesión restaurada"
                    );
                    SessionState::Authenticated(session)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse stored user");
                    SessionState::Anonymous
                }
            },
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                e.log();
                SessionState::Anonymous
            }
        };

        self.tx.send_replace(restored.clone());
        restored
    }

    /// Guarda token y usuario y marca la sesión como iniciada
    ///
    /// Devuelve la página de destino según el rol.
    pub fn login(&self, session: Session) -> ClientResult<Route> {
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        self.storage.set_item(USER_KEY, &serde_json::to_string(&session)?)?;

        let landing = session.role.landing_route();
        tracing::info!(user_id = %session.user_id, role = ?session.role, "Sesión iniciada");
        self.tx.send_replace(SessionState::Authenticated(session));
        Ok(landing)
    }

    /// Borra token y usuario
    pub fn logout(&self) -> ClientResult<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        tracing::info!("Sesión cerrada");
        self.tx.send_replace(SessionState::Anonymous);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Vista de sólo lectura de la sesión
#[derive(Debug, Clone)]
pub struct SessionReader {
    rx: watch::Receiver<SessionState>,
}

impl SessionReader {
    pub fn state(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.rx.borrow() == SessionState::Loading
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(*self.rx.borrow(), SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<Session> {
        self.rx.borrow().user().cloned()
    }

    pub fn role(&self) -> Option<Role> {
        self.rx.borrow().user().map(|s| s.role)
    }

    /// Espera al siguiente cambio y devuelve el nuevo estado
    ///
    /// Si el almacén ya no existe devuelve el último estado conocido.
    pub async fn changed(&mut self) -> SessionState {
        let _ = self.rx.changed().await;
        self.rx.borrow_and_update().clone()
    }

    /// Espera a que la sesión deje de estar en `Loading`
    pub async fn resolved(&mut self) -> SessionState {
        let resolved = self
            .rx
            .wait_for(|s| *s != SessionState::Loading)
            .await
            .map(|state| state.clone())
            .ok();
        resolved.unwrap_or_else(|| self.state())
    }
}
