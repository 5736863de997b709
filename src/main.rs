//! # BookIt Web
//!
//! Servidor del sitio exportado de BookIt, construido con Actix Web.
//!
//! ## Configuración
//!
//! Variables de entorno (archivo `.env`):
//!
//! ```env
//! # Backend REST que usarán las páginas
//! API_BASE_URL=http://localhost:8080/api
//!
//! # Servidor
//! BIND_ADDRESS=0.0.0.0:3000
//! STATIC_DIR=./out
//!
//! # Logging
//! RUST_LOG=debug,actix_web=info
//! ```
//!
//! ## Ejecución
//!
//! ```bash
//! # 1. Exportar el sitio a ./out
//! # 2. Configurar variables de entorno
//! cp .env.example .env
//!
//! # 3. Compilar y ejecutar
//! cargo run
//!
//! # 4. Abrir http://localhost:3000/home
//! ```

use actix_web::{middleware::Logger, App, HttpServer};

use bookit_web::config::Config;
use bookit_web::site;

/// Arranca el servidor del sitio
///
/// # Errores
///
/// Retorna `std::io::Error` si:
/// - La configuración del entorno es inválida
/// - No se puede bindear al puerto especificado
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bookit_web=debug".parse().unwrap())
                .add_directive("actix_web=info".parse().unwrap()),
        )
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!(error = %e, "Configuración inválida");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if !config.static_dir.is_dir() {
        tracing::warn!(
            static_dir = %config.static_dir.display(),
            "El directorio del sitio no existe; sólo responderá /config.json"
        );
    }

    tracing::info!(
        bind_address = %config.bind_address,
        api_base_url = %config.api_base_url,
        "Iniciando BookIt Web"
    );

    let bind_address = config.bind_address.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| site::configure(cfg, &config))
    })
    .bind(&bind_address)?
    .run()
    .await
}
