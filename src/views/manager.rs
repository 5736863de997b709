//! Vistas del gestor: panel de restaurantes, mesas y formularios de alta
//! y edición.

use std::time::Duration;

use chrono::NaiveTime;

use super::{authed_api, remove_by_id, require_role, Gate, Loadable};
use crate::api::manager::{AddTables, RestaurantRequest};
use crate::api::upload::ImageUpload;
use crate::api::{ApiClient, ClientError, ClientResult};
use crate::forms::{parse_time_field, to_12_hour};
use crate::models::{Address, Id, Restaurant, Role, Session, Table};
use crate::routes::{Redirect, Route, DEFAULT_REDIRECT_DELAY};
use crate::session::SessionReader;

pub const MANAGER_DASHBOARD_SIGN_IN: &str = "Please log in as a manager to access the dashboard.";
pub const MANAGER_PAGE_SIGN_IN: &str = "Please log in as a manager to access this page.";

fn manager(session: &SessionReader, denied: &str) -> Result<Session, Gate> {
    require_role(session, Role::Manager, denied)
}

/// Restaurantes del gestor, sin los `INACTIVE`
pub struct ManagerDashboard {
    api: ApiClient,
    session: SessionReader,
    pub restaurants: Loadable<Vec<Restaurant>>,
    pub error: Option<String>,
    pub notice: Option<&'static str>,
}

impl ManagerDashboard {
    pub fn new(api: ApiClient, session: SessionReader) -> Self {
        Self {
            api,
            session,
            restaurants: Loadable::Loading,
            error: None,
            notice: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), Gate> {
        let user = manager(&self.session, MANAGER_DASHBOARD_SIGN_IN)?;

        self.restaurants = match self.api.for_session(&user).manager_restaurants(&user.user_id).await {
            Ok(mut list) => {
                list.retain(|r| !r.is_inactive());
                Loadable::Ready(list)
            }
            Err(_) => Loadable::Failed("Failed to fetch restaurants".to_string()),
        };
        Ok(())
    }

    pub async fn delete(&mut self, restaurant_id: &str) -> ClientResult<()> {
        let api = authed_api(&self.api, &self.session)?;
        match api.delete_manager_restaurant(restaurant_id).await {
            Ok(()) => {
                if let Some(list) = self.restaurants.ready_mut() {
                    remove_by_id(list, restaurant_id, |r| r.id.as_str());
                }
                self.notice = Some("Restaurant deleted successfully!");
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.message_or("Failed to delete restaurant"));
                Err(e)
            }
        }
    }
}

/// Mesas de uno de los restaurantes del gestor
pub struct ManageTables {
    api: ApiClient,
    session: SessionReader,
    pub restaurants: Loadable<Vec<Restaurant>>,
    pub selected: Option<Id>,
    pub tables: Loadable<Vec<Table>>,
    pub error: Option<String>,
    pub notice: Option<&'static str>,
}

impl ManageTables {
    pub fn new(api: ApiClient, session: SessionReader) -> Self {
        Self {
            api,
            session,
            restaurants: Loadable::Loading,
            selected: None,
            tables: Loadable::Loading,
            error: None,
            notice: None,
        }
    }

    /// Carga los restaurantes, selecciona el primero y pide sus mesas
    pub async fn load(&mut self) -> Result<(), Gate> {
        let user = manager(&self.session, MANAGER_PAGE_SIGN_IN)?;

        match self.api.for_session(&user).manager_restaurants(&user.user_id).await {
            Ok(list) => {
                let first = list.first().map(|r| r.id.clone());
                self.restaurants = Loadable::Ready(list);
                if let Some(id) = first {
                    self.select(&id).await;
                }
            }
            Err(_) => self.restaurants = Loadable::Failed("Failed to fetch restaurants".to_string()),
        }
        Ok(())
    }

    pub async fn select(&mut self, restaurant_id: &str) {
        self.selected = Some(restaurant_id.to_string());
        self.tables = Loadable::Loading;

        let result = match authed_api(&self.api, &self.session) {
            Ok(api) => api.tables(restaurant_id).await,
            Err(e) => Err(e),
        };
        self.tables = match result {
            Ok(tables) => Loadable::Ready(tables),
            Err(_) => Loadable::Failed("Failed to fetch tables".to_string()),
        };
    }

    /// Cambia las plazas de una mesa y actualiza la copia local
    pub async fn update_seats(&mut self, table_id: &str, seats: u32) -> ClientResult<()> {
        let api = authed_api(&self.api, &self.session)?;
        match api.update_table_seats(table_id, seats).await {
            Ok(()) => {
                if let Some(table) = self
                    .tables
                    .ready_mut()
                    .and_then(|tables| tables.iter_mut().find(|t| t.id == table_id))
                {
                    table.seats = seats;
                }
                self.notice = Some("Table updated successfully!");
                Ok(())
            }
            Err(e) => {
                self.error = Some("Failed to update table".to_string());
                Err(e)
            }
        }
    }

    pub async fn delete_table(&mut self, table_id: &str) -> ClientResult<()> {
        let Some(restaurant_id) = self.selected.clone() else {
            return Err(ClientError::validation_field("restaurantId", "No restaurant selected"));
        };
        let api = authed_api(&self.api, &self.session)?;

        match api.delete_tables(&restaurant_id, &[table_id.to_string()]).await {
            Ok(()) => {
                if let Some(tables) = self.tables.ready_mut() {
                    remove_by_id(tables, table_id, |t| t.id.as_str());
                }
                self.notice = Some("Table deleted successfully!");
                Ok(())
            }
            Err(e) => {
                self.error = Some("Failed to delete table".to_string());
                Err(e)
            }
        }
    }
}

/// Formulario "Add Tables"
#[derive(Debug, Clone)]
pub struct AddTablesForm {
    pub restaurant_id: Option<Id>,
    pub count: u32,
    pub seats: u32,
    pub redirect_delay: Duration,
    pub error: Option<String>,
}

impl Default for AddTablesForm {
    fn default() -> Self {
        Self {
            restaurant_id: None,
            count: 1,
            seats: 2,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            error: None,
        }
    }
}

impl AddTablesForm {
    /// Añade las mesas; si sale bien devuelve la vuelta al panel
    pub async fn submit(&mut self, api: &ApiClient, session: &SessionReader) -> ClientResult<Redirect> {
        self.error = None;

        let Some(restaurant_id) = self.restaurant_id.clone() else {
            self.error = Some("Please select a restaurant".to_string());
            return Err(ClientError::validation_field("restaurantId", "Please select a restaurant"));
        };
        if self.count == 0 || self.seats == 0 {
            self.error = Some("Failed to add tables".to_string());
            return Err(ClientError::validation_field("numberOfTables", "Must be at least 1"));
        }

        let request = AddTables {
            number_of_tables: self.count,
            table_size: self.seats,
        };
        let result = match authed_api(api, session) {
            Ok(api) => api.add_tables(&restaurant_id, request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => Ok(Redirect {
                route: Route::ManagerDashboard,
                after: self.redirect_delay,
            }),
            Err(e) => {
                self.error = Some("Failed to add tables".to_string());
                Err(e)
            }
        }
    }
}

/// Formulario de alta y edición de restaurante
///
/// Las horas se editan en 24h y se envían en 12h.
#[derive(Debug, Clone)]
pub struct RestaurantForm {
    pub name: String,
    pub description: String,
    pub address: Address,
    pub phone_number: String,
    pub cuisine: String,
    pub cost_rating: u8,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    /// Fotos nuevas
    pub images: Vec<ImageUpload>,
    /// Fotos existentes que se conservan (sólo en edición)
    pub retained_images: Vec<String>,
    pub redirect_delay: Duration,
    pub error: Option<String>,
}

impl Default for RestaurantForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            address: Address::default(),
            phone_number: String::new(),
            cuisine: String::new(),
            cost_rating: 1,
            opening_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            closing_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
            images: Vec::new(),
            retained_images: Vec::new(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            error: None,
        }
    }
}

impl RestaurantForm {
    /// Rellena el formulario con un restaurante existente
    pub fn from_restaurant(restaurant: &Restaurant) -> ClientResult<Self> {
        let opening = restaurant.opening_time.as_deref().unwrap_or("09:00 AM");
        let closing = restaurant.closing_time.as_deref().unwrap_or("10:00 PM");

        Ok(Self {
            name: restaurant.name.clone(),
            description: restaurant.description.clone().unwrap_or_default(),
            address: restaurant.address.clone().unwrap_or_default(),
            phone_number: restaurant.contact.clone().unwrap_or_default(),
            cuisine: restaurant.cuisine.clone().unwrap_or_default(),
            cost_rating: restaurant.cost_rating.unwrap_or(1),
            opening_time: parse_time_field("openingTime", opening)?,
            closing_time: parse_time_field("closingTime", closing)?,
            retained_images: restaurant.photos.clone(),
            ..Self::default()
        })
    }

    pub fn remove_retained_image(&mut self, index: usize) {
        if index < self.retained_images.len() {
            self.retained_images.remove(index);
        }
    }

    fn request(&self) -> RestaurantRequest {
        RestaurantRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            phone_number: self.phone_number.clone(),
            cuisine: self.cuisine.clone(),
            cost_rating: self.cost_rating,
            opening_time: to_12_hour(self.opening_time),
            closing_time: to_12_hour(self.closing_time),
            ..RestaurantRequest::default()
        }
    }

    /// Cuerpo de alta: lleva el id del gestor
    pub fn to_new_request(&self, manager_id: &str) -> RestaurantRequest {
        RestaurantRequest {
            manager_id: Some(manager_id.to_string()),
            ..self.request()
        }
    }

    /// Cuerpo de edición: lleva el id del restaurante y las fotos que se
    /// conservan
    pub fn to_update_request(&self, restaurant_id: &str) -> RestaurantRequest {
        RestaurantRequest {
            restaurant_id: Some(restaurant_id.to_string()),
            retained_image_urls: Some(self.retained_images.clone()),
            ..self.request()
        }
    }

    pub async fn submit_new(&mut self, api: &ApiClient, session: &SessionReader) -> ClientResult<Redirect> {
        self.error = None;
        let user = manager(session, MANAGER_PAGE_SIGN_IN)
            .map_err(|gate| ClientError::Validation(gate.message().to_string()))?;

        let request = self.to_new_request(&user.user_id);
        let result = api.for_session(&user).add_restaurant(&request, &self.images).await;
        self.finish(result, "Failed to add restaurant")
    }

    pub async fn submit_update(
        &mut self,
        api: &ApiClient,
        session: &SessionReader,
        restaurant_id: &str,
    ) -> ClientResult<Redirect> {
        self.error = None;
        let user = manager(session, MANAGER_PAGE_SIGN_IN)
            .map_err(|gate| ClientError::Validation(gate.message().to_string()))?;

        let request = self.to_update_request(restaurant_id);
        let result = api.for_session(&user).update_restaurant(&request, &self.images).await;
        self.finish(result, "Failed to update restaurant")
    }

    fn finish(&mut self, result: ClientResult<()>, fallback: &str) -> ClientResult<Redirect> {
        match result {
            Ok(()) => Ok(Redirect {
                route: Route::ManagerDashboard,
                after: self.redirect_delay,
            }),
            Err(e) => {
                self.error = Some(e.message_or(fallback));
                Err(e)
            }
        }
    }
}

/// Página de edición: busca el restaurante entre los del gestor
pub struct EditRestaurant {
    api: ApiClient,
    session: SessionReader,
    pub restaurant_id: Id,
    pub form: Loadable<RestaurantForm>,
}

impl EditRestaurant {
    pub fn new(api: ApiClient, session: SessionReader, restaurant_id: impl Into<Id>) -> Self {
        Self {
            api,
            session,
            restaurant_id: restaurant_id.into(),
            form: Loadable::Loading,
        }
    }

    pub async fn load(&mut self) -> Result<(), Gate> {
        let user = manager(&self.session, MANAGER_PAGE_SIGN_IN)?;

        let restaurants = match self.api.for_session(&user).manager_restaurants(&user.user_id).await {
            Ok(list) => list,
            Err(_) => {
                self.form = Loadable::Failed("Failed to fetch restaurant details".to_string());
                return Ok(());
            }
        };

        self.form = match restaurants.iter().find(|r| r.id == self.restaurant_id) {
            None => Loadable::Failed("Restaurant not found".to_string()),
            Some(restaurant) => match RestaurantForm::from_restaurant(restaurant) {
                Ok(form) => Loadable::Ready(form),
                Err(e) => {
                    e.log();
                    Loadable::Failed("Failed to fetch restaurant details".to_string())
                }
            },
        };
        Ok(())
    }

    pub async fn save(&mut self) -> ClientResult<Redirect> {
        let restaurant_id = self.restaurant_id.clone();
        let Some(form) = self.form.ready_mut() else {
            return Err(ClientError::Validation("Restaurant not loaded".to_string()));
        };
        form.submit_update(&self.api, &self.session, &restaurant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant() -> Restaurant {
        Restaurant {
            id: "5".into(),
            name: "Sushi Bar".into(),
            address: Some(Address {
                street: "1 Main".into(),
                city: "San Jose".into(),
                state: "CA".into(),
                zip_code: "95112".into(),
                full_address: None,
            }),
            contact: Some("555".into()),
            cost_rating: Some(3),
            opening_time: Some("11:30 AM".into()),
            closing_time: Some("09:00 PM".into()),
            photos: vec!["a.jpg".into(), "b.jpg".into()],
            ..Restaurant::default()
        }
    }

    #[test]
    fn edit_form_round_trips_times_in_twelve_hour_format() {
        let form = RestaurantForm::from_restaurant(&restaurant()).unwrap();
        assert_eq!(form.opening_time, NaiveTime::from_hms_opt(11, 30, 0).unwrap());

        let request = form.to_update_request("5");
        assert_eq!(request.opening_time, "11:30 AM");
        assert_eq!(request.closing_time, "09:00 PM");
        assert_eq!(request.restaurant_id.as_deref(), Some("5"));
        assert_eq!(request.manager_id, None);
    }

    #[test]
    fn removed_photos_are_not_retained() {
        let mut form = RestaurantForm::from_restaurant(&restaurant()).unwrap();
        form.remove_retained_image(0);
        form.remove_retained_image(9);
        assert_eq!(
            form.to_update_request("5").retained_image_urls,
            Some(vec!["b.jpg".to_string()])
        );
    }

    #[test]
    fn new_restaurant_defaults() {
        let request = RestaurantForm::default().to_new_request("m-1");
        assert_eq!(request.opening_time, "09:00 AM");
        assert_eq!(request.closing_time, "10:00 PM");
        assert_eq!(request.cost_rating, 1);
        assert_eq!(request.manager_id.as_deref(), Some("m-1"));
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("retainedImageUrls").is_none());
    }
}
