//! Vistas de administración: aprobaciones pendientes, bajas y panel.

use super::{authed_api, remove_by_id, require_role, Gate, Loadable};
use crate::api::{ApiClient, ClientResult};
use crate::models::{BookingStat, DashboardSummary, MonthlyStat, PopularSlots, Restaurant, Role};
use crate::session::SessionReader;

pub const ADMIN_SIGN_IN: &str = "Please sign in to access the admin dashboard";
pub const DELETED_NOTICE: &str = "Restaurant deleted successfully.";

/// Restaurantes pendientes de aprobación
pub struct PendingRestaurants {
    api: ApiClient,
    session: SessionReader,
    pub restaurants: Loadable<Vec<Restaurant>>,
    /// Error de la última aprobación/rechazo
    pub error: Option<String>,
}

impl PendingRestaurants {
    pub fn new(api: ApiClient, session: SessionReader) -> Self {
        Self {
            api,
            session,
            restaurants: Loadable::Loading,
            error: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), Gate> {
        let admin = require_role(&self.session, Role::Admin, ADMIN_SIGN_IN)?;

        self.restaurants = match self.api.for_session(&admin).pending_restaurants().await {
            Ok(list) => {
                tracing::debug!(count = list.len(), "Restaurantes pendientes cargados");
                Loadable::Ready(list)
            }
            Err(e) => Loadable::Failed(
                e.user_message("view pending restaurants", "Failed to fetch pending restaurants"),
            ),
        };
        Ok(())
    }

    pub async fn approve(&mut self, restaurant_id: &str) -> ClientResult<()> {
        let result = self.authed()?.approve_restaurant(restaurant_id).await;
        self.settle(restaurant_id, result, "approve restaurants", "Failed to approve restaurant")
    }

    pub async fn reject(&mut self, restaurant_id: &str) -> ClientResult<()> {
        let result = self.authed()?.reject_restaurant(restaurant_id).await;
        self.settle(restaurant_id, result, "reject restaurants", "Failed to reject restaurant")
    }

    fn authed(&self) -> ClientResult<ApiClient> {
        authed_api(&self.api, &self.session)
    }

    fn settle(
        &mut self,
        restaurant_id: &str,
        result: ClientResult<()>,
        action: &str,
        fallback: &str,
    ) -> ClientResult<()> {
        match result {
            Ok(()) => {
                if let Some(list) = self.restaurants.ready_mut() {
                    remove_by_id(list, restaurant_id, |r| r.id.as_str());
                }
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message(action, fallback));
                Err(e)
            }
        }
    }
}

/// Listado completo con baja de restaurantes
pub struct AllRestaurants {
    api: ApiClient,
    session: SessionReader,
    pub restaurants: Loadable<Vec<Restaurant>>,
    pub error: Option<String>,
    /// Aviso tras una baja correcta
    pub notice: Option<&'static str>,
}

impl AllRestaurants {
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
        let admin = require_role(&self.session, Role::Admin, ADMIN_SIGN_IN)?;

        self.restaurants = match self.api.for_session(&admin).all_restaurants().await {
            Ok(list) => Loadable::Ready(list),
            Err(_) => Loadable::Failed("Failed to load restaurants.".to_string()),
        };
        Ok(())
    }

    /// Borra el restaurante y lo quita de la lista sin volver a pedirla
    pub async fn delete(&mut self, restaurant_id: &str) -> ClientResult<()> {
        let api = authed_api(&self.api, &self.session)?;
        match api.delete_restaurant(restaurant_id).await {
            Ok(()) => {
                if let Some(list) = self.restaurants.ready_mut() {
                    remove_by_id(list, restaurant_id, |r| r.id.as_str());
                }
                tracing::info!(restaurant_id, "Restaurante eliminado");
                self.error = None;
                self.notice = Some(DELETED_NOTICE);
                Ok(())
            }
            Err(e) => {
                self.error = Some("Failed to delete restaurant.".to_string());
                Err(e)
            }
        }
    }
}

/// Datos del panel de analíticas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    /// Estadísticas por restaurante, sin los marcados "inactive"
    pub booking_stats: Vec<BookingStat>,
    pub popular_slots: PopularSlots,
    pub monthly: Vec<MonthlyStat>,
}

pub struct AdminDashboard {
    api: ApiClient,
    session: SessionReader,
    pub data: Loadable<Dashboard>,
}

impl AdminDashboard {
    pub fn new(api: ApiClient, session: SessionReader) -> Self {
        Self {
            api,
            session,
            data: Loadable::Loading,
        }
    }

    pub async fn load(&mut self) -> Result<(), Gate> {
        let admin = require_role(&self.session, Role::Admin, ADMIN_SIGN_IN)?;
        let api = self.api.for_session(&admin);

        self.data = match fetch_dashboard(&api).await {
            Ok(dashboard) => Loadable::Ready(dashboard),
            Err(e) => Loadable::Failed(e.message_or("Failed to load dashboard data")),
        };
        Ok(())
    }
}

async fn fetch_dashboard(api: &ApiClient) -> ClientResult<Dashboard> {
    let summary = api.dashboard_summary().await?;
    let mut booking_stats = api.booking_stats().await?;
    let popular_slots = api.popular_slots().await?;
    let monthly = api.monthly_stats().await?;

    booking_stats.retain(|stat| !stat.is_inactive());

    Ok(Dashboard {
        summary,
        booking_stats,
        popular_slots,
        monthly,
    })
}
