//! Páginas públicas: portada, búsqueda y detalle de restaurante.
//!
//! Ninguna necesita sesión.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};

use super::Loadable;
use crate::api::restaurant::{SearchQuery, DEFAULT_LOCATION};
use crate::api::{ApiClient, ClientError, ClientResult};
use crate::models::{AvailableRestaurant, CategoryBuckets, Id, Restaurant};
use crate::routes::Route;

/// Restaurantes por categoría de cocina en la portada
pub const CATEGORY_PREVIEW: usize = 4;
/// Horarios libres que se muestran como mucho
pub const MAX_TIME_SLOTS: usize = 40;
pub const DEFAULT_PARTY_SIZE: u32 = 2;
/// Opciones del selector de comensales
pub const PARTY_SIZES: std::ops::RangeInclusive<u32> = 1..=10;

pub struct HomeView {
    api: ApiClient,
    pub available: Loadable<Vec<AvailableRestaurant>>,
    pub categories: Loadable<CategoryBuckets>,
}

impl HomeView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            available: Loadable::Loading,
            categories: Loadable::Loading,
        }
    }

    pub async fn load(&mut self) {
        self.available = match self.api.available_restaurants().await {
            Ok(list) => Loadable::Ready(list),
            Err(_) => Loadable::Failed("Failed to fetch available restaurants".to_string()),
        };
        self.categories = match self.api.categories(DEFAULT_LOCATION).await {
            Ok(buckets) => Loadable::Ready(buckets),
            Err(_) => Loadable::Failed("Failed to fetch categories".to_string()),
        };
    }

    /// Primeros restaurantes de una cocina
    pub async fn cuisine_preview(&self, cuisine: &str) -> Loadable<Vec<Restaurant>> {
        match self.api.restaurants_by_cuisine(cuisine).await {
            Ok(mut list) => {
                list.truncate(CATEGORY_PREVIEW);
                Loadable::Ready(list)
            }
            Err(_) => Loadable::Failed("Failed to fetch restaurants".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Orden del backend
    #[default]
    Relevance,
    RatingHighToLow,
    RatingLowToHigh,
}

/// Filtros de la barra lateral; se aplican sobre la respuesta, sin volver
/// a preguntar al backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub cost_ratings: BTreeSet<u8>,
    /// Estrellas mínimas ("4 & above")
    pub min_rating: Option<u8>,
    pub cuisines: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub sort: SortOrder,
}

impl SearchFilters {
    pub fn toggle_cost(&mut self, rating: u8) {
        if !self.cost_ratings.remove(&rating) {
            self.cost_ratings.insert(rating);
        }
    }

    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        if !self.cuisines.remove(cuisine) {
            self.cuisines.insert(cuisine.to_string());
        }
    }

    pub fn toggle_city(&mut self, city: &str) {
        if !self.cities.remove(city) {
            self.cities.insert(city.to_string());
        }
    }

    /// Un conjunto vacío no filtra
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let cost_ok = self.cost_ratings.is_empty()
            || restaurant
                .cost_rating
                .is_some_and(|c| self.cost_ratings.contains(&c));
        let rating_ok = match self.min_rating {
            None => true,
            Some(min) => restaurant.avg_star_rating.unwrap_or(0.0) >= f32::from(min),
        };
        let cuisine_ok = self.cuisines.is_empty()
            || restaurant
                .cuisine
                .as_deref()
                .is_some_and(|c| self.cuisines.contains(c));
        let city_ok = self.cities.is_empty()
            || restaurant.city().is_some_and(|c| self.cities.contains(c));

        cost_ok && rating_ok && cuisine_ok && city_ok
    }

    pub fn apply<'a>(&self, restaurants: &'a [Restaurant]) -> Vec<&'a Restaurant> {
        let mut out: Vec<&Restaurant> = restaurants.iter().filter(|r| self.matches(r)).collect();
        let rating = |r: &Restaurant| r.avg_star_rating.unwrap_or(0.0);
        match self.sort {
            SortOrder::Relevance => {}
            SortOrder::RatingHighToLow => out.sort_by(|a, b| rating(b).total_cmp(&rating(a))),
            SortOrder::RatingLowToHigh => out.sort_by(|a, b| rating(a).total_cmp(&rating(b))),
        }
        out
    }
}

/// Cocinas presentes en los resultados, para la barra lateral
pub fn cuisine_options(restaurants: &[Restaurant]) -> BTreeSet<String> {
    restaurants.iter().filter_map(|r| r.cuisine.clone()).collect()
}

pub fn city_options(restaurants: &[Restaurant]) -> BTreeSet<String> {
    restaurants
        .iter()
        .filter_map(|r| r.city().map(str::to_string))
        .collect()
}

pub struct SearchView {
    api: ApiClient,
    pub query: SearchQuery,
    pub results: Loadable<Vec<Restaurant>>,
    pub filters: SearchFilters,
}

impl SearchView {
    pub fn new(api: ApiClient, query: SearchQuery) -> Self {
        Self {
            api,
            query,
            results: Loadable::Loading,
            filters: SearchFilters::default(),
        }
    }

    pub async fn load(&mut self) {
        self.results = Loadable::Loading;
        self.results = match self.api.search_restaurants(&self.query).await {
            Ok(list) => {
                tracing::debug!(count = list.len(), location = %self.query.location, "Búsqueda completada");
                Loadable::Ready(list)
            }
            Err(_) => Loadable::Failed("Failed to fetch restaurants".to_string()),
        };
    }

    /// Resultados tras aplicar los filtros
    pub fn visible(&self) -> Vec<&Restaurant> {
        self.results
            .ready()
            .map(|list| self.filters.apply(list))
            .unwrap_or_default()
    }
}

/// Ficha del restaurante con el selector de reserva
pub struct RestaurantDetail {
    api: ApiClient,
    pub restaurant_id: Id,
    pub restaurant: Loadable<Restaurant>,
    pub date: NaiveDate,
    pub people: u32,
    /// Como mucho [`MAX_TIME_SLOTS`], "HH:MM"
    pub times: Vec<String>,
    pub selected_time: Option<String>,
    /// Fallo al pedir horarios; la ficha sigue visible
    pub error: Option<String>,
}

impl RestaurantDetail {
    pub fn new(api: ApiClient, restaurant_id: impl Into<Id>, today: NaiveDate) -> Self {
        Self {
            api,
            restaurant_id: restaurant_id.into(),
            restaurant: Loadable::Loading,
            date: today,
            people: DEFAULT_PARTY_SIZE,
            times: Vec::new(),
            selected_time: None,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        match self.api.get_restaurant(&self.restaurant_id).await {
            Ok(restaurant) => {
                self.restaurant = Loadable::Ready(restaurant);
                self.refresh_times().await;
            }
            Err(_) => {
                self.restaurant = Loadable::Failed("Failed to fetch restaurant details".to_string())
            }
        }
    }

    pub async fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.refresh_times().await;
    }

    pub async fn set_people(&mut self, people: u32) {
        self.people = people.clamp(*PARTY_SIZES.start(), *PARTY_SIZES.end());
        self.refresh_times().await;
    }

    /// Pide los horarios libres y preselecciona el primero
    ///
    /// Si falla se conservan los horarios anteriores.
    pub async fn refresh_times(&mut self) {
        match self
            .api
            .available_times(&self.restaurant_id, self.date, self.people)
            .await
        {
            Ok(mut times) => {
                times.truncate(MAX_TIME_SLOTS);
                self.selected_time = times.first().cloned();
                self.times = times;
                self.error = None;
            }
            Err(_) => self.error = Some("Failed to fetch available times".to_string()),
        }
    }

    pub fn select_time(&mut self, time: &str) {
        if self.times.iter().any(|t| t == time) {
            self.selected_time = Some(time.to_string());
        }
    }

    /// Ruta de la página de reserva con fecha, hora y comensales elegidos
    pub fn booking_route(&self) -> ClientResult<Route> {
        let raw = self
            .selected_time
            .as_deref()
            .ok_or_else(|| ClientError::validation_field("time", "Please select a time"))?;
        let time = NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| ClientError::validation_field("time", "Invalid time"))?;

        Ok(Route::Booking {
            restaurant_id: self.restaurant_id.clone(),
            date_time: self.date.and_time(time),
            people: self.people,
        })
    }
}
