use serde::{Deserialize, Serialize};

use super::{id, or_default, Id};

/// Estado de aprobación de un restaurante por parte del administrador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Estado operativo de un restaurante
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestaurantStatus {
    Open,
    Closed,
    Inactive,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(deserialize_with = "or_default::deserialize")]
    pub street: String,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub city: String,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub state: String,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub zip_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
}

impl Address {
    pub fn display(&self) -> String {
        match &self.full_address {
            Some(full) if !full.is_empty() => full.clone(),
            _ => format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip_code),
        }
    }
}

/// Restaurante tal como lo devuelven los distintos endpoints
///
/// El backend no es uniforme: el detalle público trae la dirección en
/// campos sueltos (`street`, `city`...) mientras que las vistas de gestor
/// la traen anidada en `address`. Casi todo es opcional por ese motivo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Restaurant {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: Id,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub name: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub cost_rating: Option<u8>,
    #[serde(alias = "avgRating")]
    pub avg_star_rating: Option<f32>,
    pub total_reviews: Option<u32>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub address: Option<Address>,
    #[serde(alias = "phoneNumber")]
    pub contact: Option<String>,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub photos: Vec<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub status: Option<RestaurantStatus>,
    pub approval_status: Option<ApprovalStatus>,
}

impl Restaurant {
    /// Dirección para mostrar, venga anidada o en campos sueltos
    pub fn display_address(&self) -> String {
        if let Some(address) = &self.address {
            return address.display();
        }
        format!(
            "{}, {}, {} {}",
            self.street.as_deref().unwrap_or_default(),
            self.city.as_deref().unwrap_or_default(),
            self.state.as_deref().unwrap_or_default(),
            self.zip_code.as_deref().unwrap_or_default()
        )
    }

    /// Ciudad, venga anidada o en campos sueltos
    pub fn city(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or_else(|| self.address.as_ref().map(|a| a.city.as_str()))
            .filter(|c| !c.is_empty())
    }

    /// "$", "$$" o "$$$"
    pub fn cost_label(&self) -> &'static str {
        cost_label(self.cost_rating.unwrap_or(0))
    }

    pub fn is_inactive(&self) -> bool {
        self.status == Some(RestaurantStatus::Inactive)
    }
}

pub(crate) fn cost_label(rating: u8) -> &'static str {
    match rating {
        1 => "$",
        2 => "$$",
        _ => "$$$",
    }
}

/// Tarjeta de la portada con horarios libres de hoy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailableRestaurant {
    #[serde(deserialize_with = "id::deserialize")]
    pub restaurant_id: Id,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub restaurant_name: String,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub photos: Vec<String>,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub avg_rating: f32,
    pub cuisine: Option<String>,
    pub cost_rating: Option<u8>,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub total_reviews: u32,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub booked_today: u32,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub available_times: Vec<String>,
}

/// Listas destacadas de `/restaurants/categories`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryBuckets {
    #[serde(deserialize_with = "or_default::deserialize")]
    pub top_rated: Vec<Restaurant>,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub top_booked_today: Vec<Restaurant>,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub near_you: Vec<Restaurant>,
}

/// Mesa de un restaurante
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: Id,
    pub table_number: Option<u32>,
    #[serde(alias = "capacity", deserialize_with = "or_default::deserialize")]
    pub seats: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_payload_with_nested_address() {
        let json = r#"{
            "id": 3,
            "name": "Trattoria",
            "address": {"street": "1 Main", "city": "San Jose", "state": "CA", "zipCode": "95112",
                        "fullAddress": "1 Main, San Jose, CA 95112"},
            "photos": ["https://cdn.site.com/a.jpg"],
            "status": "INACTIVE",
            "approvalStatus": "PENDING",
            "avgStarRating": 4.5
        }"#;

        let r: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(r.display_address(), "1 Main, San Jose, CA 95112");
        assert_eq!(r.city(), Some("San Jose"));
        assert!(r.is_inactive());
        assert_eq!(r.approval_status, Some(ApprovalStatus::Pending));
    }

    #[test]
    fn unknown_status_does_not_fail() {
        let r: Restaurant = serde_json::from_str(r#"{"id":"x","status":"ON_HOLD"}"#).unwrap();
        assert_eq!(r.status, Some(RestaurantStatus::Unknown));
    }

    #[test]
    fn table_accepts_capacity_alias() {
        let t: Table = serde_json::from_str(r#"{"id": 5, "capacity": 6}"#).unwrap();
        assert_eq!(t.seats, 6);
    }

    #[test]
    fn null_fields_do_not_break_decoding() {
        let list: Vec<Restaurant> = serde_json::from_str(
            r#"[{"id": 1, "name": "A", "photos": ["a.jpg"]},
                {"id": 2, "name": null, "photos": null, "address": {"street": null, "city": "San Jose"}}]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[1].photos.is_empty());
        assert_eq!(list[1].name, "");
        assert_eq!(list[1].city(), Some("San Jose"));

        let card: AvailableRestaurant = serde_json::from_str(
            r#"{"restaurantId": 3, "restaurantName": "B", "avgRating": null, "totalReviews": null,
                "photos": null, "availableTimes": null}"#,
        )
        .unwrap();
        assert_eq!(card.avg_rating, 0.0);
        assert!(card.available_times.is_empty());

        let table: Table = serde_json::from_str(r#"{"id": 5, "seats": null}"#).unwrap();
        assert_eq!(table.seats, 0);
    }

    #[test]
    fn cost_labels() {
        assert_eq!(cost_label(1), "$");
        assert_eq!(cost_label(2), "$$");
        assert_eq!(cost_label(3), "$$$");
    }
}
