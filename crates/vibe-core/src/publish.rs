//! Publishing collaborators: object storage, link shortening, QR encoding.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Content type of uploaded applet documents.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Object path for a published applet.
pub fn applet_object_path(owner_uid: &str, unix_millis: i64) -> String {
    format!("apps/{}/{}/index.html", owner_uid, unix_millis)
}

/// Durable storage for published documents.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` at `path` and returns a URL it can be fetched from.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

/// Turns a long URL into a short one.
#[async_trait]
pub trait LinkShortener: Send + Sync {
    async fn shorten(&self, url: &str) -> Result<String>;
}

/// Renders a URL as a QR code image.
#[async_trait]
pub trait QrEncoder: Send + Sync {
    /// Returns the image as a `data:` URL.
    async fn encode(&self, url: &str) -> Result<String>;
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub entry_id: String,
    pub long_url: String,
    /// Equals `long_url` when shortening failed or could not be recorded
    pub short_url: String,
    pub qr_code_data_url: Option<String>,
}
