//! Unified path management for vibe configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/vibe/              # Config directory
//! ├── config.toml              # Studio configuration
//! ├── secret.json              # API keys
//! ├── roster.toml              # Registered teachers
//! └── catalog.toml             # Persona/template overrides
//!
//! ~/.local/share/vibe/         # Data directory
//! ├── sessions/                # Saved sessions, one JSON file each
//! ├── gallery/                 # Published entries, one JSON file each
//! └── objects/                 # Uploaded applet documents
//! ```

use std::path::{Path, PathBuf};
use vibe_core::config::StudioConfig;
use vibe_core::error::{Result, VibeError};

const APP_DIR: &str = "vibe";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VibePaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
    roster_file: Option<PathBuf>,
    catalog_file: Option<PathBuf>,
}

impl VibePaths {
    /// Resolves the platform config and data directories.
    pub fn from_system() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| VibeError::config("Cannot determine the config directory"))?
            .join(APP_DIR);
        let data_dir = dirs::data_dir()
            .ok_or_else(|| VibeError::config("Cannot determine the data directory"))?
            .join(APP_DIR);
        Ok(Self::new(config_dir, data_dir))
    }

    pub fn new(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
            roster_file: None,
            catalog_file: None,
        }
    }

    /// Applies the path overrides from `config`.
    pub fn with_overrides(mut self, config: &StudioConfig) -> Self {
        if let Some(dir) = &config.data_dir {
            self.data_dir = dir.clone();
        }
        self.roster_file = config.roster_path.clone();
        self.catalog_file = config.catalog_path.clone();
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to the secrets file. Keep it readable by the owner only.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn roster_file(&self) -> PathBuf {
        self.roster_file
            .clone()
            .unwrap_or_else(|| self.config_dir.join("roster.toml"))
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.catalog_file
            .clone()
            .unwrap_or_else(|| self.config_dir.join("catalog.toml"))
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir.join("sessions")
    }

    pub fn gallery_dir(&self) -> PathBuf {
        self.data_dir.join("gallery")
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.data_dir.join("objects")
    }
}
