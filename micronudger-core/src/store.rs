//! Local persistence for the profile, passphrase hash and chat history.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DATA_FILE, HABITS_FILE, LAST_BATCH_FILE};
use crate::error::NudgerResult;
use crate::profile::Profile;
use crate::transcript::Transcript;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// SHA-256 hex of the passphrase, once one has been created.
    pub pass_hash: Option<String>,
}

/// Everything the coach remembers between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalData {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub pref: Preferences,
    #[serde(default)]
    pub history: Transcript,
}

/// The data directory and the files kept in it.
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DataStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE)
    }

    pub fn habits_path(&self) -> PathBuf {
        self.dir.join(HABITS_FILE)
    }

    pub fn last_batch_path(&self) -> PathBuf {
        self.dir.join(LAST_BATCH_FILE)
    }

    /// Load the data document. A missing or unreadable file yields defaults.
    pub fn load(&self) -> LocalData {
        let path = self.data_path();
        if !path.exists() {
            return LocalData::default();
        }

        match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
        {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable data file");
                LocalData::default()
            }
        }
    }

    pub fn save(&self, data: &LocalData) -> NudgerResult<()> {
        write_json_atomic(&self.data_path(), data)
    }

    /// Remove profile, history, custom habits and the last generated batch.
    pub fn wipe(&self) -> NudgerResult<()> {
        for path in [self.data_path(), self.habits_path(), self.last_batch_path()] {
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        tracing::info!(dir = %self.dir.display(), "wiped local data");
        Ok(())
    }
}

/// Write JSON through a temp file and rename, so readers never see a partial file.
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> NudgerResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    let temp = path.with_extension("json.tmp");

    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}
