//! # Application Configuration
//!
//! Settings are read from a single YAML file. Every field has a default, so a
//! partial file (or no file at all) is valid.
//!
//! ## YAML Format
//!
//! ```yaml
//! storage_mode: local            # or "remote"
//! personal_category: "Personal"
//! company_category: "Company"
//! reminder_days:
//!   min: 0
//!   max: 365
//! currency_symbol: "R$"
//! dashboard_preview_limit: 3
//! remote_fixture: "dashboard.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::models::CategoryNames;
use crate::domain::validation::ReminderDayBounds;

/// Where dashboard data comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to write config file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage_mode: StorageMode,
    pub personal_category: String,
    pub company_category: String,
    pub reminder_days: ReminderDayBounds,
    pub currency_symbol: String,
    /// Duties shown per dashboard list
    pub dashboard_preview_limit: usize,
    /// JSON file standing in for the remote dashboard endpoint
    pub remote_fixture: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::Local,
            personal_category: "Personal".to_string(),
            company_category: "Company".to_string(),
            reminder_days: ReminderDayBounds::default(),
            currency_symbol: "R$".to_string(),
            dashboard_preview_limit: 3,
            remote_fixture: None,
        }
    }
}

impl AppConfig {
    /// Load config from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml_content = serde_yaml::to_string(self)?;
        fs::write(path, yaml_content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn category_names(&self) -> CategoryNames {
        CategoryNames {
            personal: self.personal_category.clone(),
            company: self.company_category.clone(),
        }
    }
}
