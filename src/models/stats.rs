use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{id, or_default, Id};

/// Resumen de `/admin/restaurants/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    #[serde(deserialize_with = "or_default::deserialize")]
    pub total_restaurants: u64,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub pending_approvals: u64,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub total_bookings_last_month: u64,
}

/// Estadística de reservas por restaurante (`/booking-stats`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingStat {
    #[serde(rename = "restaurantID", deserialize_with = "id::deserialize")]
    pub restaurant_id: Id,
    #[serde(rename = "restaurantName")]
    pub restaurant_name: Option<String>,
    #[serde(rename = "totalBookings", deserialize_with = "or_default::deserialize")]
    pub total_bookings: u64,
    #[serde(rename = "totalCancellations", deserialize_with = "or_default::deserialize")]
    pub total_cancellations: u64,
    /// "85%" o "N/A"
    #[serde(rename = "successRate", deserialize_with = "or_default::deserialize")]
    pub success_rate: String,
}

/// Banda de color para la tasa de éxito
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessBand {
    NotAvailable,
    High,
    Medium,
    Low,
}

impl BookingStat {
    /// Las filas de restaurantes dados de baja se marcan con el nombre "inactive"
    pub fn is_inactive(&self) -> bool {
        self.restaurant_name.as_deref() == Some("inactive")
    }

    /// Porcentaje numérico al principio de `success_rate`
    pub fn success_percent(&self) -> Option<u32> {
        let digits: String = self
            .success_rate
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// >= 80 alto, >= 50 medio, resto bajo
    pub fn success_band(&self) -> SuccessBand {
        match self.success_percent() {
            None => SuccessBand::NotAvailable,
            Some(p) if p >= 80 => SuccessBand::High,
            Some(p) if p >= 50 => SuccessBand::Medium,
            Some(_) => SuccessBand::Low,
        }
    }
}

/// Reservas agregadas por mes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyStat {
    #[serde(deserialize_with = "or_default::deserialize")]
    pub month: String,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub total_bookings: u64,
    #[serde(deserialize_with = "or_default::deserialize")]
    pub total_cancellations: u64,
}

/// Franja horaria → número de reservas
pub type PopularSlots = BTreeMap<String, u64>;

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(rate: &str) -> BookingStat {
        BookingStat {
            success_rate: rate.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn success_bands() {
        assert_eq!(stat("N/A").success_band(), SuccessBand::NotAvailable);
        assert_eq!(stat("92%").success_band(), SuccessBand::High);
        assert_eq!(stat("80").success_band(), SuccessBand::High);
        assert_eq!(stat("51.5%").success_band(), SuccessBand::Medium);
        assert_eq!(stat("12%").success_band(), SuccessBand::Low);
    }

    #[test]
    fn null_stats_are_not_available() {
        let stats: Vec<BookingStat> = serde_json::from_str(
            r#"[{"restaurantID": 1, "restaurantName": null, "totalBookings": null,
                 "totalCancellations": null, "successRate": null}]"#,
        )
        .unwrap();
        assert_eq!(stats[0].total_bookings, 0);
        assert_eq!(stats[0].success_band(), SuccessBand::NotAvailable);
    }
}
