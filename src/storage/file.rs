use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::LocalStorage;
use crate::api::middleware::ErrorLogExt;
use crate::api::{ClientError, ClientResult, ResultExt};

/// `localStorage` respaldado por un fichero JSON
///
/// El fichero se lee entero al abrir y se reescribe entero en cada cambio.
/// No hay coordinación entre procesos: dos clientes sobre el mismo fichero
/// se pisan igual que dos pestañas del navegador.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Almacenamiento local corrupto, se empieza vacío"
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ClientError::storage("open_local_storage", e)),
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "Almacenamiento local abierto");

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .log_error_context("creating local storage directory")
                    .map_err(|e| ClientError::storage("create_storage_dir", e))?;
            }
        }

        let raw = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, raw)
            .log_error_context("writing local storage")
            .map_err(|e| ClientError::storage("write_local_storage", e))
    }

    fn lock(&self) -> ClientResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
            .map_err_internal("local storage lock poisoned")
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    /// El mapa en memoria sólo cambia si el fichero se escribió
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut items = self.lock()?;
        let mut next = items.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *items = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        let mut items = self.lock()?;
        if !items.contains_key(key) {
            return Ok(());
        }
        let mut next = items.clone();
        next.remove(key);
        self.persist(&next)?;
        *items = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        assert_ok!(storage.set_item("token", "abc"));
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("token").unwrap().as_deref(), Some("abc"));

        assert_ok!(reopened.remove_item("token"));
        assert_eq!(reopened.get_item("token").unwrap(), None);
        assert_eq!(FileStorage::open(&path).unwrap().get_item("token").unwrap(), None);
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        assert_ok!(storage.set_item("user", "ana"));

        // un directorio en lugar del fichero hace fallar la escritura
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(storage.set_item("token", "jwt").is_err());
        assert_eq!(storage.get_item("token").unwrap(), None);

        assert!(storage.remove_item("user").is_err());
        assert_eq!(storage.get_item("user").unwrap().as_deref(), Some("ana"));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("user").unwrap(), None);
    }
}
