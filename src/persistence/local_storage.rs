//! Browser LocalStorage profile store (wasm32)

use super::{ProfileStore, SAVE_KEY, StoreError, decode, encode};
use crate::profile::PlayerProfile;

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not available".into()))
    }
}

impl ProfileStore for LocalStorageStore {
    fn load(&mut self) -> Result<Option<PlayerProfile>, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(SAVE_KEY) {
            Ok(Some(json)) => decode(&json).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Unavailable(format!("{:?}", e))),
        }
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = encode(profile)?;
        storage
            .set_item(SAVE_KEY, &json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
