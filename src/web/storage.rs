//! localStorage backend for the gallery cache.

use web_sys::Storage;

use crate::constants::STORAGE_KEY;
use crate::error::StoreError;
use crate::store::StorageBackend;

/// Gallery cache backend over the browser's localStorage, bound to
/// [`STORAGE_KEY`]. Other tabs sharing the key are not coordinated; the
/// last writer wins.
pub(crate) struct LocalStorageBackend {
    storage: Storage,
}

impl LocalStorageBackend {
    pub(crate) fn new() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Storage("no window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Storage(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| StoreError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(STORAGE_KEY)
            .map_err(|e| StoreError::Storage(format!("failed to read localStorage: {:?}", e)))
    }

    fn write(&self, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(STORAGE_KEY, value)
            .map_err(|e| StoreError::Storage(format!("failed to write localStorage: {:?}", e)))
    }
}
