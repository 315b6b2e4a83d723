//! Directory-backed GalleryRepository implementation.

use crate::paths::VibePaths;
use crate::storage::JsonDirStorage;
use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;
use vibe_core::error::Result;
use vibe_core::gallery::{GalleryEntry, GalleryFilter, GalleryRepository};

pub struct DirGalleryRepository {
    storage: JsonDirStorage<GalleryEntry>,
}

impl DirGalleryRepository {
    pub async fn from_paths(paths: &VibePaths) -> Result<Self> {
        Self::new(paths.gallery_dir()).await
    }

    pub async fn new(gallery_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            storage: JsonDirStorage::new(gallery_dir).await?,
        })
    }
}

/// Sorts newest first and applies the filter's limit.
pub(crate) fn select_entries(
    entries: impl IntoIterator<Item = GalleryEntry>,
    filter: &GalleryFilter,
) -> Vec<GalleryEntry> {
    let mut selected: Vec<GalleryEntry> = entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect();
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = filter.limit {
        selected.truncate(limit);
    }
    selected
}

#[async_trait]
impl GalleryRepository for DirGalleryRepository {
    async fn upsert(&self, id: Option<&str>, record: &GalleryEntry) -> Result<String> {
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut stored = record.clone();
        stored.id = Some(id.clone());
        self.storage.save(&id, &stored).await?;
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<GalleryEntry>> {
        Ok(self.storage.load(id).await?.map(|mut entry| {
            entry.id = Some(id.to_string());
            entry
        }))
    }

    async fn query(&self, filter: &GalleryFilter) -> Result<Vec<GalleryEntry>> {
        let entries = self
            .storage
            .load_all()
            .await?
            .into_iter()
            .map(|(id, mut entry)| {
                entry.id = Some(id);
                entry
            });
        Ok(select_entries(entries, filter))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.storage.delete(id).await
    }
}
