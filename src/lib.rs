//! # BookIt Web
//!
//! Cliente del sistema de reservas de restaurantes BookIt: sesión
//! persistente, flujo de reserva, vistas de cliente, gestor y administrador,
//! todo sobre el backend REST de BookIt.
//!
//! ## Módulos
//!
//! - [`api`] - Cliente HTTP tipado del backend
//! - [`models`] - Tipos del dominio tal como viajan en JSON
//! - [`session`] - Sesión del usuario (escritor único, lectores inyectados)
//! - [`storage`] - Almacenamiento local clave/valor
//! - [`booking`] - Máquina de estados de la página de reserva
//! - [`views`] - Controladores de las páginas
//! - [`forms`] - Login, registro y formato de horas
//! - [`routes`] - Rutas del sitio y redirecciones diferidas
//! - [`site`] - Servidor del sitio exportado
//! - [`config`] - Configuración desde el entorno
//!
//! ## Ejemplo
//!
//! ```no_run
//! use bookit_web::api::ApiClient;
//! use bookit_web::booking::{BookingFlow, BookingParams};
//! use bookit_web::config::Config;
//! use bookit_web::session::SessionStore;
//! use bookit_web::storage::FileStorage;
//!
//! # async fn run() -> bookit_web::api::ClientResult<()> {
//! let config = Config::from_env()?;
//! let api = ApiClient::from_config(&config)?;
//! let store = SessionStore::restored(FileStorage::open(&config.storage_path)?);
//!
//! let params = BookingParams::from_pairs([
//!     ("restaurantId", "12"),
//!     ("dateTime", "2025-04-28T17:30:00"),
//!     ("people", "2"),
//! ]);
//! let mut flow = BookingFlow::new(api, store.reader(), params, config.redirect_delay);
//! flow.mount().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod booking;
pub mod config;
pub mod forms;
pub mod models;
pub mod routes;
pub mod session;
pub mod site;
pub mod storage;
pub mod views;
