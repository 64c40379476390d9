//! User preferences persisted as a JSON file.

use crate::errors::ServiceError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use wallet_core::recent::RecentAddress;

/// Preferences kept across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Faucet base URL chosen by the user
    #[serde(default)]
    pub faucet_base_url: Option<String>,
    /// Recent destination addresses, newest first
    #[serde(default)]
    pub recent_addresses: Vec<RecentAddress>,
}

/// File-backed preference storage.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `preferences.json` under the user's data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shielded-wallet")
            .join("preferences.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the preferences; a missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences, ServiceError> {
        if !self.path.exists() {
            debug!("No preferences at {}", self.path.display());
            return Ok(Preferences::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, preferences: &Preferences) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(preferences)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Loads, changes and saves the preferences in one step.
    pub fn update<F>(&self, f: F) -> Result<Preferences, ServiceError>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut preferences = self.load()?;
        f(&mut preferences);
        self.save(&preferences)?;
        Ok(preferences)
    }
}
