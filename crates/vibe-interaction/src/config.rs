//! Secret configuration.
//!
//! Reads API credentials from `secret.json` in the vibe config directory.
//! Values loaded here are never logged.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use vibe_core::error::{Result, VibeError};

/// Environment variable that overrides the stored Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "VIBE_GEMINI_API_KEY";

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
    #[serde(default)]
    pub bitly: Option<BitlyConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Bitly API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BitlyConfig {
    pub access_token: String,
}

impl SecretConfig {
    /// Replaces the Gemini key with `key` when one is given.
    pub fn with_gemini_key_override(mut self, key: Option<String>) -> Self {
        let Some(key) = key.filter(|k| !k.trim().is_empty()) else {
            return self;
        };
        match self.gemini.as_mut() {
            Some(gemini) => gemini.api_key = key,
            None => {
                self.gemini = Some(GeminiConfig {
                    api_key: key,
                    model_name: None,
                })
            }
        }
        self
    }

    pub fn require_gemini(&self) -> Result<&GeminiConfig> {
        self.gemini.as_ref().ok_or_else(|| {
            VibeError::config(format!(
                "Gemini configuration not found in secret.json and {} is not set",
                GEMINI_API_KEY_ENV
            ))
        })
    }
}

/// Loads the secret file at `path`, then applies the environment override.
///
/// A missing file is not an error: the result simply has no credentials
/// unless the environment supplies them.
pub fn load_secret_config(path: &Path) -> Result<SecretConfig> {
    let stored = if path.exists() {
        let content = fs::read_to_string(path).map_err(|e| {
            VibeError::config(format!(
                "Failed to read secret file at {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            VibeError::config(format!(
                "Failed to parse secret file at {}: {}",
                path.display(),
                e
            ))
        })?
    } else {
        tracing::debug!(path = %path.display(), "No secret file");
        SecretConfig::default()
    };

    Ok(stored.with_gemini_key_override(std::env::var(GEMINI_API_KEY_ENV).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secret_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        fs::write(
            &path,
            r#"{"gemini": {"api_key": "g-key", "model_name": "gemini-2.5-pro"}, "bitly": {"access_token": "b-token"}}"#,
        )
        .unwrap();

        let config = load_secret_config(&path).unwrap();
        let gemini = config.require_gemini().unwrap();
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(config.bitly.unwrap().access_token, "b-token");
    }

    #[test]
    fn test_override_replaces_or_creates_key() {
        let config = SecretConfig::default().with_gemini_key_override(Some("env-key".into()));
        assert_eq!(config.require_gemini().unwrap().api_key, "env-key");

        let config = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "stored".into(),
                model_name: Some("m".into()),
            }),
            bitly: None,
        }
        .with_gemini_key_override(Some("env-key".into()));
        let gemini = config.require_gemini().unwrap();
        assert_eq!(gemini.api_key, "env-key");
        assert_eq!(gemini.model_name.as_deref(), Some("m"));

        let unchanged = SecretConfig::default().with_gemini_key_override(Some("  ".into()));
        assert!(unchanged.require_gemini().is_err());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(load_secret_config(&path), Err(VibeError::Config(_))));
    }
}
