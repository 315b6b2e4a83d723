//! Session repository trait.
//!
//! Defines the interface for saved-session persistence.

use super::snapshot::SessionSnapshot;
use crate::error::Result;
use async_trait::async_trait;

/// Selects saved sessions in [`SessionRepository::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    /// Only sessions owned by this uid
    pub owner_uid: Option<String>,
}

impl SessionFilter {
    pub fn owned_by(uid: impl Into<String>) -> Self {
        Self {
            owner_uid: Some(uid.into()),
        }
    }

    pub fn matches(&self, snapshot: &SessionSnapshot) -> bool {
        self.owner_uid
            .as_deref()
            .is_none_or(|uid| snapshot.owner_uid == uid)
    }
}

/// An abstract store for saved sessions.
///
/// Decouples the session controller from the storage mechanism (a directory
/// of JSON files, an in-memory map, a remote document store).
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Inserts or replaces a snapshot.
    ///
    /// # Arguments
    ///
    /// * `id` - Existing id to overwrite, or `None` to insert a new record
    /// * `record` - The snapshot to store
    ///
    /// # Returns
    ///
    /// The id the record is stored under.
    async fn upsert(&self, id: Option<&str>, record: &SessionSnapshot) -> Result<String>;

    /// Finds a snapshot by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(_))`: Snapshot found, with `id` populated
    /// - `Ok(None)`: No such record
    async fn get(&self, id: &str) -> Result<Option<SessionSnapshot>>;

    /// Lists snapshots matching `filter`, most recently updated first.
    async fn query(&self, filter: &SessionFilter) -> Result<Vec<SessionSnapshot>>;

    /// Deletes a snapshot. Deleting a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}
