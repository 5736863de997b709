use serde::{Deserialize, Serialize};

use super::{id, or_default, Id};

/// Reseña de un cliente
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: Id,
    #[serde(rename = "restaurantID", deserialize_with = "id::deserialize")]
    pub restaurant_id: Id,
    #[serde(rename = "customerID", deserialize_with = "id::option::deserialize")]
    pub customer_id: Option<Id>,
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub rating: u8,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub comments: String,
    /// Fecha ISO-8601 tal cual la envía el backend
    pub date: Option<String>,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub photos: Vec<String>,
}

/// Cuerpo JSON de la parte `request` al publicar una reseña
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    #[serde(rename = "restaurantID")]
    pub restaurant_id: Id,
    #[serde(rename = "customerID")]
    pub customer_id: Id,
    pub rating: u8,
    pub comments: String,
    pub date: String,
}
