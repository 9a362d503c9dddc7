//! JSON file profile store (native)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ProfileStore, StoreError, decode, encode};
use crate::profile::PlayerProfile;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/odd_one_away_save_v1.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", super::SAVE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for FileStore {
    fn load(&mut self) -> Result<Option<PlayerProfile>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => decode(&json).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), StoreError> {
        let json = encode(profile)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write to a sibling then rename so a crash never leaves half a save
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
