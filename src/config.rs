//! # Configuración
//!
//! Todo se lee de variables de entorno (y de un `.env` si existe):
//!
//! ```env
//! # Backend REST
//! API_BASE_URL=http://localhost:8080/api
//!
//! # Fichero que hace de localStorage
//! STORAGE_PATH=.bookit/local-storage.json
//!
//! # Servidor del sitio estático
//! BIND_ADDRESS=0.0.0.0:3000
//! STATIC_DIR=./out
//!
//! # Espera antes de redirigir tras confirmar/cancelar
//! REDIRECT_DELAY_MS=2000
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{ClientError, ClientResult};
use crate::routes::DEFAULT_REDIRECT_DELAY;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub storage_path: PathBuf,
    pub bind_address: String,
    pub static_dir: PathBuf,
    pub redirect_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            storage_path: PathBuf::from(".bookit/local-storage.json"),
            bind_address: "0.0.0.0:3000".to_string(),
            static_dir: PathBuf::from("./out"),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

impl Config {
    /// Carga la configuración desde el entorno
    ///
    /// Las variables ausentes toman su valor por defecto. Sólo falla si
    /// `REDIRECT_DELAY_MS` no es un número.
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let redirect_delay = match env::var("REDIRECT_DELAY_MS") {
            Ok(raw) => Duration::from_millis(raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("REDIRECT_DELAY_MS inválido: '{}'", raw))
            })?),
            Err(_) => defaults.redirect_delay,
        };

        let config = Config {
            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            storage_path: env::var("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            redirect_delay,
        };

        tracing::debug!(
            api_base_url = %config.api_base_url,
            storage_path = %config.storage_path.display(),
            "Configuración cargada"
        );

        Ok(config)
    }
}
