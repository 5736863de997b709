//! # API pública de restaurantes
//!
//! Endpoints sin autenticación: portada, búsqueda, detalle y horarios libres.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Method;

use super::{ApiClient, ClientResult};
use crate::models::{AvailableRestaurant, CategoryBuckets, Restaurant};

/// Ubicación por defecto de la búsqueda y de las categorías
pub const DEFAULT_LOCATION: &str = "San Jose";

/// Parámetros de `/restaurants/search`
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub location: String,
    pub people: u32,
    pub name: Option<String>,
    pub zip_code: Option<String>,
    /// Momento buscado, tal cual se pasa al backend (ISO-8601)
    pub datetime: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            people: 1,
            name: None,
            zip_code: None,
            datetime: "2025-04-28T17:30:00-07:00".to_string(),
        }
    }
}

impl SearchQuery {
    /// Construye la búsqueda a partir de los parámetros de la URL
    ///
    /// Los ausentes o vacíos toman el valor por defecto.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = SearchQuery::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "location" => query.location = value.to_string(),
                "people" => {
                    if let Ok(people) = value.parse() {
                        query.people = people;
                    }
                }
                "name" => query.name = Some(value.to_string()),
                "zipCode" => query.zip_code = Some(value.to_string()),
                "datetime" => query.datetime = value.to_string(),
                _ => {}
            }
        }
        query
    }

    /// Separa un código postal escrito dentro del texto libre
    ///
    /// "pizza 95112" busca el nombre "pizza" con `zipCode=95112`.
    pub fn with_free_text(mut self, text: &str) -> Self {
        let zip = text
            .split_whitespace()
            .find(|word| word.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string);

        let name: Vec<&str> = text
            .split_whitespace()
            .filter(|word| Some(*word) != zip.as_deref())
            .collect();
        let name = name.join(" ");

        if !name.is_empty() {
            self.name = Some(name);
        }
        if zip.is_some() {
            self.zip_code = zip;
        }
        self
    }

    pub fn at(mut self, datetime: NaiveDateTime) -> Self {
        self.datetime = datetime.format("%Y-%m-%dT%H:%M:%S").to_string();
        self
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("location", self.location.clone()),
            ("people", self.people.to_string()),
        ];
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(zip) = &self.zip_code {
            pairs.push(("zipCode", zip.clone()));
        }
        pairs.push(("datetime", self.datetime.clone()));
        pairs
    }
}

impl ApiClient {
    /// Tarjetas de la portada con mesas libres hoy
    pub async fn available_restaurants(&self) -> ClientResult<Vec<AvailableRestaurant>> {
        let builder = self.request(Method::GET, "/restaurants/available-tables");
        self.send_json("available_restaurants", builder).await
    }

    pub async fn categories(&self, location: &str) -> ClientResult<CategoryBuckets> {
        let builder = self
            .request(Method::GET, "/restaurants/categories")
            .query(&[("location", location)]);
        self.send_json("categories", builder).await
    }

    pub async fn search_restaurants(&self, query: &SearchQuery) -> ClientResult<Vec<Restaurant>> {
        let builder = self
            .request(Method::GET, "/restaurants/search")
            .query(&query.to_pairs());
        self.send_json("search_restaurants", builder).await
    }

    /// Restaurantes de una cocina concreta (enlaces de categoría de la portada)
    pub async fn restaurants_by_cuisine(&self, cuisine: &str) -> ClientResult<Vec<Restaurant>> {
        let builder = self
            .request(Method::GET, "/restaurants/search")
            .query(&[("cuisine", cuisine)]);
        self.send_json("restaurants_by_cuisine", builder).await
    }

    pub async fn get_restaurant(&self, id: &str) -> ClientResult<Restaurant> {
        let builder = self.request(Method::GET, &format!("/restaurants/{}", id));
        self.send_json("get_restaurant", builder).await
    }

    /// Horarios libres ("HH:MM") para una fecha y número de comensales
    pub async fn available_times(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
        people: u32,
    ) -> ClientResult<Vec<String>> {
        let builder = self
            .request(Method::GET, &format!("/restaurants/{}/available-times", restaurant_id))
            .query(&[
                ("date", date.format("%Y-%m-%d").to_string()),
                ("people", people.to_string()),
            ]);
        self.send_json("available_times", builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_params() {
        let query = SearchQuery::from_pairs([("people", "4"), ("name", "")]);
        assert_eq!(query.location, DEFAULT_LOCATION);
        assert_eq!(query.people, 4);
        assert_eq!(query.name, None);
    }

    #[test]
    fn free_text_splits_zip_code() {
        let query = SearchQuery::default().with_free_text("pizza 95112 place");
        assert_eq!(query.name.as_deref(), Some("pizza place"));
        assert_eq!(query.zip_code.as_deref(), Some("95112"));

        let only_zip = SearchQuery::default().with_free_text("95112");
        assert_eq!(only_zip.name, None);
        assert_eq!(only_zip.zip_code.as_deref(), Some("95112"));
    }

    #[test]
    fn optional_params_are_omitted() {
        let pairs = SearchQuery::default().to_pairs();
        let keys: Vec<_> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["location", "people", "datetime"]);
    }
}
