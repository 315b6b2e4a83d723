//! Studio configuration model.
//!
//! Stored as `config.toml` in the platform config directory. Every field has
//! a default so a missing or partial file still yields a usable config.

use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model used when neither config nor secret file names one.
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";

/// Generation request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Link shortening request timeout in seconds.
pub const DEFAULT_SHORTEN_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub model_name: String,
    /// Language used when a command does not name one
    pub default_language: Language,
    /// Root of session, gallery and published-object storage.
    /// `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Base URL published objects are served from.
    /// `None` yields `file://` URLs into the object directory.
    pub public_base_url: Option<String>,
    /// Registered-teacher roster. `None` means `roster.toml` in the config dir.
    pub roster_path: Option<PathBuf>,
    /// Persona/template overrides. `None` means `catalog.toml` in the config dir.
    pub catalog_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub shorten_timeout_secs: u64,
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            default_language: Language::English,
            data_dir: None,
            public_base_url: None,
            roster_path: None,
            catalog_path: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            shorten_timeout_secs: DEFAULT_SHORTEN_TIMEOUT_SECS,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: StudioConfig = toml::from_str(
            r#"
            default_language = "he"
            request_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.default_language, Language::Hebrew);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.model_name, DEFAULT_MODEL_NAME);
        assert_eq!(config.shorten_timeout_secs, DEFAULT_SHORTEN_TIMEOUT_SECS);
        assert!(config.data_dir.is_none());
    }
}
