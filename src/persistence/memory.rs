//! In-memory profile store

use super::{ProfileStore, StoreError, decode, encode};
use crate::profile::PlayerProfile;

/// Keeps the serialized blob in memory, exactly as a real store would see it
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing (possibly corrupt) blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            saves: 0,
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ProfileStore for MemoryStore {
    fn load(&mut self) -> Result<Option<PlayerProfile>, StoreError> {
        self.blob.as_deref().map(decode).transpose()
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), StoreError> {
        self.blob = Some(encode(profile)?);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_nothing() {
        assert!(MemoryStore::new().load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut profile = PlayerProfile::default();
        profile.streak = 4;
        store.save(&profile).unwrap();
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load().unwrap(), Some(profile));
        assert!(store.blob().unwrap().contains("\"streak\":4"));
    }
}
