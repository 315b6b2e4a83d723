//! Gallery repository trait.

use super::model::GalleryEntry;
use crate::error::Result;
use async_trait::async_trait;

/// Selects gallery entries in [`GalleryRepository::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryFilter {
    pub owner_uid: Option<String>,
    pub school_code: Option<String>,
    pub domain: Option<String>,
    /// Maximum number of entries returned
    pub limit: Option<usize>,
}

impl GalleryFilter {
    pub fn owned_by(uid: impl Into<String>) -> Self {
        Self {
            owner_uid: Some(uid.into()),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, entry: &GalleryEntry) -> bool {
        self.owner_uid
            .as_deref()
            .is_none_or(|uid| entry.owner_uid == uid)
            && self
                .school_code
                .as_deref()
                .is_none_or(|code| entry.school_code == code)
            && self
                .domain
                .as_deref()
                .is_none_or(|domain| entry.metadata.domain == domain)
    }
}

/// An abstract store for published gallery entries.
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Inserts or replaces an entry and returns its id.
    async fn upsert(&self, id: Option<&str>, record: &GalleryEntry) -> Result<String>;

    /// Finds an entry by id.
    async fn get(&self, id: &str) -> Result<Option<GalleryEntry>>;

    /// Lists entries matching `filter`, newest first, truncated to its limit.
    async fn query(&self, filter: &GalleryFilter) -> Result<Vec<GalleryEntry>>;

    /// Deletes an entry. Deleting a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}
