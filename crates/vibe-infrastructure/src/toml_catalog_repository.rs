//! TOML-file catalog repository.

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use std::path::PathBuf;
use vibe_core::catalog::{Catalog, CatalogRepository, default_catalog};
use vibe_core::error::Result;

/// Reads `catalog.toml` and layers it over the built-in presets.
///
/// Entries in the file replace presets with the same id and new ids are
/// added. A missing file yields the presets unchanged.
pub struct TomlCatalogRepository {
    file: AtomicTomlFile<Catalog>,
}

impl TomlCatalogRepository {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

#[async_trait]
impl CatalogRepository for TomlCatalogRepository {
    async fn load(&self) -> Result<Catalog> {
        match self.file.load()? {
            Some(overrides) => {
                tracing::debug!(
                    path = %self.file.path().display(),
                    personas = overrides.personas.len(),
                    templates = overrides.templates.len(),
                    "Loaded catalog overrides"
                );
                Ok(default_catalog().merged_with(overrides))
            }
            None => Ok(default_catalog()),
        }
    }
}
