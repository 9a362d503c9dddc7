//! Player profile persistence
//!
//! The round machine never sees a storage error:
//! - `load_or_default` falls back to a fresh profile on any failure
//! - `save_best_effort` logs and skips failed writes
//!
//! Backends:
//! - `MemoryStore`: in-process blob (tests, headless runs)
//! - `FileStore`: JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::ThemeId;
use crate::profile::PlayerProfile;
use crate::sim::GameMode;

/// Storage key / file stem for the save blob
pub const SAVE_KEY: &str = "odd_one_away_save_v1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt save data: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("save data is not a JSON object")]
    NotAnObject,
}

/// Somewhere a profile blob can live
pub trait ProfileStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&mut self) -> Result<Option<PlayerProfile>, StoreError>;

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), StoreError>;
}

/// Load the saved profile, or defaults if there is none or it can't be read
pub fn load_or_default<S: ProfileStore + ?Sized>(store: &mut S) -> PlayerProfile {
    match store.load() {
        Ok(Some(mut profile)) => {
            profile.normalize();
            log::info!(
                "Loaded profile (level {}, {} xp)",
                profile.level,
                profile.xp
            );
            profile
        }
        Ok(None) => {
            log::info!("No saved profile, starting fresh");
            PlayerProfile::default()
        }
        Err(e) => {
            log::warn!("Failed to load save data, using defaults: {}", e);
            PlayerProfile::default()
        }
    }
}

/// Write the profile, logging (not returning) any failure
pub fn save_best_effort<S: ProfileStore + ?Sized>(store: &mut S, profile: &PlayerProfile) {
    match store.save(profile) {
        Ok(()) => log::debug!("Profile saved"),
        Err(e) => log::error!("Failed to save data: {}", e),
    }
}

/// Parse a stored blob
///
/// Fields are merged over the defaults one at a time. A missing, `null` or
/// mistyped field keeps its default without discarding the rest, and unknown
/// theme ids are dropped from the unlock list.
pub(crate) fn decode(json: &str) -> Result<PlayerProfile, StoreError> {
    let Value::Object(fields) = serde_json::from_str(json)? else {
        return Err(StoreError::NotAnObject);
    };

    let mut profile = PlayerProfile::default();
    if let Some(xp) = field(&fields, "xp") {
        profile.xp = xp;
    }
    if let Some(streak) = field(&fields, "streak") {
        profile.streak = streak;
    }
    if let Some(theme) = field::<ThemeId>(&fields, "selectedThemeId") {
        profile.selected_theme = theme;
    }

    match fields.get("highScores") {
        Some(Value::Object(scores)) => {
            for mode in GameMode::ALL {
                let key = mode.as_str().to_uppercase();
                if let Some(score) = field::<u64>(scores, &key) {
                    profile.high_scores.record(mode, score);
                }
            }
        }
        Some(Value::Null) | None => {}
        Some(other) => log::warn!("Ignoring save field `highScores`: {}", other),
    }

    match fields.get("unlockedThemes") {
        Some(Value::Array(ids)) => {
            profile.unlocked_themes = ids
                .iter()
                .filter_map(|id| match ThemeId::deserialize(id) {
                    Ok(theme) => Some(theme),
                    Err(_) => {
                        log::warn!("Dropping unknown theme {} from save data", id);
                        None
                    }
                })
                .collect();
        }
        Some(Value::Null) | None => {}
        Some(other) => log::warn!("Ignoring save field `unlockedThemes`: {}", other),
    }

    // `level` is derived from xp in `normalize`
    Ok(profile)
}

/// One field of the blob, `None` (with a warning) if it doesn't parse
fn field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    match fields.get(key)? {
        Value::Null => None,
        value => match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("Ignoring save field `{}`: {}", key, e);
                None
            }
        },
    }
}

/// Serialize for storage
pub(crate) fn encode(profile: &PlayerProfile) -> Result<String, StoreError> {
    Ok(serde_json::to_string(profile)?)
}
