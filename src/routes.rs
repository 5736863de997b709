//! Tabla de rutas del sitio exportado.
//!
//! Las vistas no navegan por sí mismas: devuelven la [`Route`] a la que la
//! página debe ir y el tiempo de espera antes de hacerlo.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDateTime;
use url::form_urlencoded;

use crate::models::Id;

/// Espera antes de volver a la portada tras confirmar o cancelar
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Search,
    Restaurant(Id),
    Booking {
        restaurant_id: Id,
        date_time: NaiveDateTime,
        people: u32,
    },
    UserProfile,
    UserReviews,
    Manager,
    ManagerDashboard,
    ManagerEditRestaurant(Id),
    Admin,
    AdminRestaurants,
    AdminRemove,
}

impl Route {
    /// Ruta relativa con su query string, lista para `router.push`
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/home".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Search => "/search".to_string(),
            Route::Restaurant(id) => format!("/restaurant/{}", id),
            Route::Booking { restaurant_id, date_time, people } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("restaurantId", restaurant_id)
                    .append_pair("dateTime", &date_time.format("%Y-%m-%dT%H:%M:%S").to_string())
                    .append_pair("people", &people.to_string())
                    .finish();
                format!("/booking?{}", query)
            }
            Route::UserProfile => "/user".to_string(),
            Route::UserReviews => "/user/reviews".to_string(),
            Route::Manager => "/manager".to_string(),
            Route::ManagerDashboard => "/manager/dashboard".to_string(),
            Route::ManagerEditRestaurant(id) => format!("/manager/restaurants/edit/{}", id),
            Route::Admin => "/admin".to_string(),
            Route::AdminRestaurants => "/admin/restaurants".to_string(),
            Route::AdminRemove => "/admin/remove".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Navegación diferida: ir a `route` pasado `after`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub after: Duration,
}

impl Redirect {
    pub fn home_after(after: Duration) -> Self {
        Self {
            route: Route::Home,
            after,
        }
    }

    /// Espera el retardo y devuelve la ruta de destino
    pub async fn wait(self) -> Route {
        tokio::time::sleep(self.after).await;
        self.route
    }
}
