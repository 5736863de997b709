//! Formularios de acceso y utilidades de formato compartidas por los
//! formularios del gestor.

use chrono::NaiveTime;

use crate::api::auth::{SignInRequest, SignUpRequest};
use crate::api::{ApiClient, ClientError, ClientResult};
use crate::models::Role;
use crate::routes::Route;
use crate::session::SessionStore;
use crate::storage::LocalStorage;

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";

/// "21:30" → "09:30 PM", el formato que espera el backend
pub fn to_12_hour(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Lee una hora en formato 12h ("09:30 PM") o 24h ("21:30")
pub fn to_24_hour(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Como [`to_24_hour`] pero con error de validación sobre `field`
pub fn parse_time_field(field: &str, raw: &str) -> ClientResult<NaiveTime> {
    to_24_hour(raw).ok_or_else(|| ClientError::validation_field(field, "Invalid time"))
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Email o teléfono
    pub contact: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginForm {
    /// Inicia sesión y guarda la sesión en `store`
    ///
    /// Devuelve la página de destino según el rol.
    pub async fn submit<S: LocalStorage>(
        &mut self,
        api: &ApiClient,
        store: &SessionStore<S>,
    ) -> ClientResult<Route> {
        self.error = None;
        let request = SignInRequest {
            email: self.contact.trim().to_string(),
            password: self.password.clone(),
        };

        let result = match api.sign_in(&request).await {
            Ok(session) => store.login(session),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            self.error = Some(match &e {
                ClientError::Transport { .. } => "Network error".to_string(),
                _ => e.message_or("Login failed"),
            });
            e
        })
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    pub error: Option<String>,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: Role::Customer,
            error: None,
        }
    }
}

impl SignupForm {
    /// Comprueba el formulario antes de enviarlo
    pub fn validate(&self) -> ClientResult<SignUpRequest> {
        if self.password != self.confirm_password {
            return Err(ClientError::Validation(PASSWORDS_DO_NOT_MATCH.to_string()));
        }
        Ok(SignUpRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        })
    }

    /// Crea la cuenta; si sale bien hay que ir a [`Route::Login`]
    ///
    /// Si las contraseñas no coinciden no se hace ninguna petición.
    pub async fn submit(&mut self, api: &ApiClient) -> ClientResult<Route> {
        self.error = None;

        let result = match self.validate() {
            Ok(request) => api.sign_up(&request).await.map(|()| Route::Login),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            self.error = Some(match &e {
                ClientError::Transport { .. } => "Network error. Try again.".to_string(),
                _ => e.message_or("Signup failed. Try again."),
            });
            e
        })
    }
}
