//! Configuration service.
//!
//! Loads `config.toml` once and caches it.

use crate::paths::VibePaths;
use crate::storage::AtomicTomlFile;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use vibe_core::config::StudioConfig;
use vibe_core::error::{Result, VibeError};

#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<StudioConfig>>,
    cached: Arc<RwLock<Option<StudioConfig>>>,
}

impl ConfigService {
    pub fn new(config_file: impl Into<PathBuf>) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(config_file)),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_paths(paths: &VibePaths) -> Self {
        Self::new(paths.config_file())
    }

    /// Returns the config, reading the file on first access.
    /// A missing file yields defaults.
    pub fn get_config(&self) -> Result<StudioConfig> {
        if let Some(cached) = self.read_cache()? {
            return Ok(cached);
        }

        let loaded = self.file.load()?.unwrap_or_default();
        *self.cached.write().map_err(poisoned)? = Some(loaded.clone());
        Ok(loaded)
    }

    /// Applies `f` to the stored config and refreshes the cache.
    pub fn update<F>(&self, f: F) -> Result<StudioConfig>
    where
        F: FnOnce(&mut StudioConfig),
    {
        self.file.update(StudioConfig::default(), |config| {
            f(config);
            Ok(())
        })?;
        self.invalidate_cache()?;
        self.get_config()
    }

    pub fn invalidate_cache(&self) -> Result<()> {
        *self.cached.write().map_err(poisoned)? = None;
        Ok(())
    }

    fn read_cache(&self) -> Result<Option<StudioConfig>> {
        Ok(self.cached.read().map_err(poisoned)?.clone())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> VibeError {
    VibeError::internal("config cache lock poisoned")
}
