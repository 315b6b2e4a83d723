//! Object store writing to a local directory.

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use vibe_core::error::{Result, VibeError};
use vibe_core::publish::ObjectStore;

/// Characters kept literal in each path segment of a public URL.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Stores objects as files under a root directory.
///
/// URLs point at `public_base_url` when one is configured, otherwise at the
/// file itself.
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            public_base_url: None,
        }
    }

    pub fn with_public_base_url(mut self, base_url: Option<String>) -> Self {
        self.public_base_url = base_url.map(|url| url.trim_end_matches('/').to_string());
        self
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if path.is_empty() || !safe {
            return Err(VibeError::persistence(format!("Invalid object path '{}'", path)));
        }
        Ok(self.root.join(relative))
    }

    fn access_url(&self, path: &str, file: &Path) -> String {
        match &self.public_base_url {
            Some(base) => {
                let encoded: Vec<String> = path
                    .split('/')
                    .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
                    .collect();
                format!("{}/{}", base, encoded.join("/"))
            }
            None => format!("file://{}", file.display()),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let file_path = self.resolve(path)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&file_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;

        tracing::debug!(path, content_type, size = bytes.len(), "Stored object");
        Ok(self.access_url(path, &file_path))
    }
}
