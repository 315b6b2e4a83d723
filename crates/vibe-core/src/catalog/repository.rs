//! Catalog repository trait.

use super::model::Catalog;
use crate::error::Result;

/// Source of the persona and template catalog.
#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Loads the full catalog.
    ///
    /// Implementations return the built-in presets when they have no
    /// stored catalog of their own.
    async fn load(&self) -> Result<Catalog>;
}
