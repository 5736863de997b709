//! # API del gestor
//!
//! Restaurantes y mesas que administra un gestor. Todas las rutas requieren
//! token de un usuario con rol `ROLE_MANAGER`.

use reqwest::Method;
use serde::Serialize;

use super::upload::{multipart_form, ImageUpload};
use super::{ApiClient, ClientResult};
use crate::models::{Address, Restaurant, Table};

/// Parte `request` de los formularios de alta/edición de restaurante
///
/// Los horarios viajan en formato 12h ("09:00 AM"), ver
/// [`crate::forms::to_12_hour`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRequest {
    /// Sólo en edición
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    /// Sólo en alta
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    pub name: String,
    pub description: String,
    pub address: Address,
    pub phone_number: String,
    pub cuisine: String,
    pub cost_rating: u8,
    pub opening_time: String,
    pub closing_time: String,
    /// Sólo en edición: fotos existentes que se conservan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_image_urls: Option<Vec<String>>,
}

/// Cuerpo de `POST /manager/tables/{id}/add-tables`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTables {
    pub number_of_tables: u32,
    pub table_size: u32,
}

impl ApiClient {
    pub async fn manager_restaurants(&self, manager_id: &str) -> ClientResult<Vec<Restaurant>> {
        let builder = self.request(
            Method::GET,
            &format!("/manager/restaurants/restaurants-by-manager/{}", manager_id),
        );
        self.send_json("manager_restaurants", builder).await
    }

    pub async fn add_restaurant(
        &self,
        request: &RestaurantRequest,
        images: &[ImageUpload],
    ) -> ClientResult<()> {
        let form = multipart_form(request, images)?;
        let builder = self
            .request(Method::POST, "/manager/restaurants/add-restaurant")
            .multipart(form);
        self.send_empty("add_restaurant", builder).await
    }

    pub async fn update_restaurant(
        &self,
        request: &RestaurantRequest,
        images: &[ImageUpload],
    ) -> ClientResult<()> {
        let form = multipart_form(request, images)?;
        let builder = self
            .request(Method::PUT, "/manager/restaurants/update-restaurant")
            .multipart(form);
        self.send_empty("update_restaurant", builder).await
    }

    pub async fn delete_manager_restaurant(&self, restaurant_id: &str) -> ClientResult<()> {
        let builder = self.request(Method::DELETE, &format!("/manager/restaurants/{}", restaurant_id));
        self.send_empty("delete_manager_restaurant", builder).await
    }

    pub async fn tables(&self, restaurant_id: &str) -> ClientResult<Vec<Table>> {
        let builder = self.request(Method::GET, &format!("/manager/tables/{}", restaurant_id));
        self.send_json("tables", builder).await
    }

    pub async fn add_tables(&self, restaurant_id: &str, request: AddTables) -> ClientResult<()> {
        let builder = self
            .request(Method::POST, &format!("/manager/tables/{}/add-tables", restaurant_id))
            .json(&request);
        self.send_empty("add_tables", builder).await
    }

    pub async fn update_table_seats(&self, table_id: &str, seats: u32) -> ClientResult<()> {
        let builder = self
            .request(Method::PUT, &format!("/manager/tables/{}/update", table_id))
            .query(&[("seats", seats)]);
        self.send_empty("update_table_seats", builder).await
    }

    /// Borra varias mesas de un restaurante; el cuerpo es un array JSON de ids
    pub async fn delete_tables(&self, restaurant_id: &str, table_ids: &[String]) -> ClientResult<()> {
        let builder = self
            .request(Method::DELETE, &format!("/manager/tables/{}/delete-many", restaurant_id))
            .json(table_ids);
        self.send_empty("delete_tables", builder).await
    }
}
