//! Modelos que intercambia el cliente con el backend REST.
//!
//! Todos los nombres de campo siguen el JSON del backend (camelCase). Los
//! identificadores se tratan siempre como texto aunque el backend los
//! envíe como números.

pub mod booking;
pub mod restaurant;
pub mod review;
pub mod session;
pub mod stats;

pub use booking::{Booking, BookingStatus};
pub use restaurant::{
    Address, ApprovalStatus, AvailableRestaurant, CategoryBuckets, Restaurant, RestaurantStatus,
    Table,
};
pub use review::{NewReview, Review};
pub use session::{Role, Session, UserProfile};
pub use stats::{BookingStat, DashboardSummary, MonthlyStat, PopularSlots, SuccessBand};

/// Identificador opaco de un recurso del backend
pub type Id = String;

/// Deserializa un identificador que puede llegar como texto o como número
pub(crate) mod id {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawId>::deserialize(deserializer)? {
            Some(RawId::Text(s)) => s,
            Some(RawId::Number(n)) => n.to_string(),
            None => String::new(),
        })
    }

    pub mod option {
        use super::RawId;
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
                RawId::Text(s) => s,
                RawId::Number(n) => n.to_string(),
            }))
        }
    }
}

/// Un `null` explícito del backend se lee como el valor por defecto
///
/// `#[serde(default)]` sólo cubre los campos ausentes.
pub(crate) mod or_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
