//! Directory of JSON records, one file per id.
//!
//! ```text
//! base_dir/
//! ├── 1f0c....json
//! └── 7a9e....json
//! ```

use serde::{Serialize, de::DeserializeOwned};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use vibe_core::error::{Result, VibeError};

use super::atomic_toml::temp_path;

pub struct JsonDirStorage<T> {
    base_dir: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> JsonDirStorage<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Opens the storage, creating `base_dir` if needed.
    pub async fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await.map_err(|e| {
            VibeError::persistence(format!(
                "Failed to create storage directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;
        Ok(Self {
            base_dir,
            _phantom: PhantomData,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(VibeError::persistence(format!("Invalid record id '{}'", id)));
        }
        Ok(self.base_dir.join(format!("{}.json", id)))
    }

    /// Loads a record; `Ok(None)` when it does not exist.
    pub async fn load(&self, id: &str) -> Result<Option<T>> {
        let path = self.record_path(id)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes a record via temp file and rename.
    pub async fn save(&self, id: &str, record: &T) -> Result<()> {
        let path = self.record_path(id)?;
        let json = serde_json::to_vec_pretty(record)?;

        let tmp_path = temp_path(&path)?;
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(&json).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }

    /// Removes a record. Missing records are ignored.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = self.record_path(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads every record as `(id, record)`.
    ///
    /// Files that fail to parse are skipped with a warning.
    pub async fn load_all(&self) -> Result<Vec<(String, T)>> {
        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if id.starts_with('.') {
                continue;
            }

            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str(&content) {
                Ok(record) => records.push((id.to_string(), record)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Skipping unreadable record: {}", e)
                }
            }
        }

        Ok(records)
    }
}
