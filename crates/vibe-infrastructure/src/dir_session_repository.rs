//! Directory-backed SessionRepository implementation.
//!
//! Each saved session is one JSON file under `sessions/`, named by id.

use crate::paths::VibePaths;
use crate::storage::JsonDirStorage;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use vibe_core::error::Result;
use vibe_core::session::{SessionFilter, SessionRepository, SessionSnapshot};

pub struct DirSessionRepository {
    storage: JsonDirStorage<SessionSnapshot>,
}

impl DirSessionRepository {
    /// Opens the repository under `paths.sessions_dir()`.
    pub async fn from_paths(paths: &VibePaths) -> Result<Self> {
        Self::new(paths.sessions_dir()).await
    }

    pub async fn new(sessions_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            storage: JsonDirStorage::new(sessions_dir).await?,
        })
    }

    pub fn sessions_dir(&self) -> &Path {
        self.storage.base_dir()
    }
}

#[async_trait]
impl SessionRepository for DirSessionRepository {
    async fn upsert(&self, id: Option<&str>, record: &SessionSnapshot) -> Result<String> {
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut stored = record.clone();
        stored.id = Some(id.clone());
        self.storage.save(&id, &stored).await?;

        tracing::debug!(session_id = %id, "Saved session snapshot");
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<SessionSnapshot>> {
        Ok(self.storage.load(id).await?.map(|mut snapshot| {
            snapshot.id = Some(id.to_string());
            snapshot
        }))
    }

    async fn query(&self, filter: &SessionFilter) -> Result<Vec<SessionSnapshot>> {
        let mut snapshots: Vec<SessionSnapshot> = self
            .storage
            .load_all()
            .await?
            .into_iter()
            .map(|(id, mut snapshot)| {
                snapshot.id = Some(id);
                snapshot
            })
            .filter(|snapshot| filter.matches(snapshot))
            .collect();

        snapshots.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(snapshots)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.storage.delete(id).await
    }
}
