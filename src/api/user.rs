use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ClientResult};
use crate::models::UserProfile;

/// Cuerpo de `PUT /users/{id}`; `password` sólo viaja si el usuario la cambió
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ApiClient {
    pub async fn get_user(&self, user_id: &str) -> ClientResult<UserProfile> {
        let builder = self.request(Method::GET, &format!("/users/{}", user_id));
        self.send_json("get_user", builder).await
    }

    pub async fn update_user(&self, user_id: &str, update: &UpdateProfile) -> ClientResult<()> {
        let builder = self
            .request(Method::PUT, &format!("/users/{}", user_id))
            .json(update);
        self.send_empty("update_user", builder).await
    }
}
