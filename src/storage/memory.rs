use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::LocalStorage;
use crate::api::ClientResult;

/// `localStorage` en memoria
///
/// Los clones comparten el mismo mapa, así que un clon sirve para simular
/// una recarga de página sobre el mismo almacenamiento.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut items = match self.items.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut items)
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.with_items(|items| items.get(key).cloned()))
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.with_items(|items| items.insert(key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.with_items(|items| items.remove(key));
        Ok(())
    }
}
