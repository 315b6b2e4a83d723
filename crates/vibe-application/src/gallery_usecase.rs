//! Gallery use case.
//!
//! Read access is open; changes are restricted to each entry's owner.

use std::sync::Arc;
use vibe_core::auth::TeacherIdentity;
use vibe_core::error::{Result, VibeError};
use vibe_core::gallery::{GalleryEntry, GalleryFilter, GalleryMetadataUpdate, GalleryRepository};

pub struct GalleryUseCase {
    gallery: Arc<dyn GalleryRepository>,
}

impl GalleryUseCase {
    pub fn new(gallery: Arc<dyn GalleryRepository>) -> Self {
        Self { gallery }
    }

    pub async fn list(&self, filter: &GalleryFilter) -> Result<Vec<GalleryEntry>> {
        self.gallery.query(filter).await
    }

    /// The caller's most recently published entry.
    pub async fn last_published(&self, owner: &TeacherIdentity) -> Result<Option<GalleryEntry>> {
        let filter = GalleryFilter::owned_by(&owner.uid).with_limit(1);
        Ok(self.gallery.query(&filter).await?.into_iter().next())
    }

    pub async fn update_metadata(
        &self,
        owner: &TeacherIdentity,
        entry_id: &str,
        update: GalleryMetadataUpdate,
    ) -> Result<GalleryEntry> {
        let mut entry = self.owned_entry(owner, entry_id).await?;
        entry.update_metadata(update);
        self.gallery.upsert(Some(entry_id), &entry).await?;
        Ok(entry)
    }

    pub async fn delete(&self, owner: &TeacherIdentity, entry_id: &str) -> Result<()> {
        self.owned_entry(owner, entry_id).await?;
        self.gallery.delete(entry_id).await?;
        tracing::info!(entry_id, "Deleted gallery entry");
        Ok(())
    }

    async fn owned_entry(&self, owner: &TeacherIdentity, entry_id: &str) -> Result<GalleryEntry> {
        let entry = self
            .gallery
            .get(entry_id)
            .await?
            .ok_or_else(|| VibeError::not_found("gallery entry", entry_id))?;
        entry.ensure_owner(&owner.uid)?;
        Ok(entry)
    }
}
