//! In-memory repositories.
//!
//! Same semantics as the directory stores without touching disk. Used by
//! tests and short-lived tools.

use crate::dir_gallery_repository::select_entries;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use vibe_core::error::Result;
use vibe_core::gallery::{GalleryEntry, GalleryFilter, GalleryRepository};
use vibe_core::session::{SessionFilter, SessionRepository, SessionSnapshot};

#[derive(Default)]
pub struct InMemorySessionRepository {
    records: RwLock<HashMap<String, SessionSnapshot>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn upsert(&self, id: Option<&str>, record: &SessionSnapshot) -> Result<String> {
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut stored = record.clone();
        stored.id = Some(id.clone());
        self.records.write().await.insert(id.clone(), stored);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<SessionSnapshot>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn query(&self, filter: &SessionFilter) -> Result<Vec<SessionSnapshot>> {
        let mut snapshots: Vec<SessionSnapshot> = self
            .records
            .read()
            .await
            .values()
            .filter(|snapshot| filter.matches(snapshot))
            .cloned()
            .collect();
        snapshots.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(snapshots)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryGalleryRepository {
    records: RwLock<HashMap<String, GalleryEntry>>,
}

impl InMemoryGalleryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl GalleryRepository for InMemoryGalleryRepository {
    async fn upsert(&self, id: Option<&str>, record: &GalleryEntry) -> Result<String> {
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut stored = record.clone();
        stored.id = Some(id.clone());
        self.records.write().await.insert(id.clone(), stored);
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<GalleryEntry>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn query(&self, filter: &GalleryFilter) -> Result<Vec<GalleryEntry>> {
        let entries: Vec<GalleryEntry> = self.records.read().await.values().cloned().collect();
        Ok(select_entries(entries, filter))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
