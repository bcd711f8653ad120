use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::domain::{FeaturePolicy, LoanInput, TrendParameters};

const APP_QUALIFIER: &str = "kr";
const APP_ORG: &str = "SeeReal";
const APP_NAME: &str = "SeeRealValuation";

/// User-adjustable settings, stored as JSON in the platform config directory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Model parameter file used instead of the bundled one.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub feature_policy: FeaturePolicy,
    /// Replaces the shipped trend constants when set.
    #[serde(default)]
    pub trend: Option<TrendParameters>,
    #[serde(default)]
    pub loan_defaults: LoanInput,
}

impl Settings {
    pub fn trend(&self) -> TrendParameters {
        self.trend.unwrap_or_default()
    }
}

pub fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

/// Reads settings from `path`; a missing or unreadable file yields `None`.
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "failed to read settings");
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring malformed settings");
            None
        }
    }
}

pub fn load_settings() -> Settings {
    settings_file()
        .and_then(|path| load_settings_from(&path))
        .unwrap_or_default()
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

pub fn save_settings(settings: &Settings) -> Result<PathBuf, PersistSaveError> {
    let path = settings_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_settings_to(&path, settings)?;
    Ok(path)
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
