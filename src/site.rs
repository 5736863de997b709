//! Servidor del sitio exportado.
//!
//! Sirve los ficheros estáticos del directorio de exportación y publica
//! en `/config.json` la URL del backend que deben usar las páginas.

use actix_files::Files;
use actix_web::{http::header, web, HttpResponse};
use serde::Serialize;

use crate::config::Config;
use crate::routes::Route;

/// Cuerpo de `GET /config.json`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub api_base_url: String,
}

async fn public_config(config: web::Data<PublicConfig>) -> HttpResponse {
    HttpResponse::Ok().json(config.get_ref())
}

async fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, Route::Home.path()))
        .finish()
}

/// Registra las rutas del sitio; `Files` va al final porque captura todo
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(web::Data::new(PublicConfig {
        api_base_url: config.api_base_url.clone(),
    }))
    .route("/config.json", web::get().to(public_config))
    .route("/", web::get().to(redirect_home))
    .service(Files::new("/", &config.static_dir).index_file("index.html"));
}
