//! Perfil del usuario.

use super::{require_user, Gate, Loadable};
use crate::api::user::UpdateProfile;
use crate::api::{ApiClient, ClientResult};
use crate::models::UserProfile;
use crate::session::SessionReader;

/// Lo que muestra el campo contraseña mientras no se toca
pub const PASSWORD_PLACEHOLDER: &str = "••••••••••";
pub const PROFILE_SIGN_IN: &str = "Please log in to view your profile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl From<UserProfile> for ProfileForm {
    fn from(profile: UserProfile) -> Self {
        Self {
            name: profile.name,
            phone: profile.phone_number,
            email: profile.email,
            password: PASSWORD_PLACEHOLDER.to_string(),
        }
    }
}

impl ProfileForm {
    /// Cuerpo del `PUT`; la contraseña sólo va si el usuario la cambió
    pub fn to_update(&self) -> UpdateProfile {
        let password = Some(self.password.clone())
            .filter(|p| !p.is_empty() && p != PASSWORD_PLACEHOLDER);
        UpdateProfile {
            name: self.name.clone(),
            phone_number: self.phone.clone(),
            email: self.email.clone(),
            password,
        }
    }
}

pub struct ProfileView {
    api: ApiClient,
    session: SessionReader,
    pub form: Loadable<ProfileForm>,
    pub success: Option<&'static str>,
    pub error: Option<String>,
}

impl ProfileView {
    pub fn new(api: ApiClient, session: SessionReader) -> Self {
        Self {
            api,
            session,
            form: Loadable::Loading,
            success: None,
            error: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), Gate> {
        let user = require_user(&self.session, PROFILE_SIGN_IN)?;

        self.form = match self.api.for_session(&user).get_user(&user.user_id).await {
            Ok(profile) => Loadable::Ready(profile.into()),
            Err(_) => Loadable::Failed("Failed to fetch user data".to_string()),
        };
        Ok(())
    }

    pub async fn save(&mut self) -> ClientResult<()> {
        let Some(form) = self.form.ready() else {
            return Ok(());
        };
        let update = form.to_update();
        let api = super::authed_api(&self.api, &self.session)?;
        let user_id = self.session.user().map(|u| u.user_id).unwrap_or_default();

        match api.update_user(&user_id, &update).await {
            Ok(()) => {
                tracing::info!(user_id = %user_id, password_changed = update.password.is_some(), "Perfil actualizado");
                self.success = Some("Profile updated successfully!");
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.success = None;
                self.error = Some(e.message_or("Failed to update profile"));
                Err(e)
            }
        }
    }
}
