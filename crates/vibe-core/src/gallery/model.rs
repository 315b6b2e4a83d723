//! Gallery entry model.

use crate::applet::AppletMetadata;
use crate::auth::TeacherIdentity;
use crate::error::{Result, VibeError};
use crate::session::{ConversationEntry, Session};
use serde::{Deserialize, Serialize};

/// A published applet as it appears in the shared gallery.
///
/// Created once at publish time. Afterwards only the owner may change its
/// metadata or delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    /// Assigned by the store on insert
    #[serde(default)]
    pub id: Option<String>,
    pub owner_uid: String,
    pub owner_name: String,
    pub school_code: String,
    pub metadata: AppletMetadata,
    /// Location of the uploaded document
    pub app_url: String,
    /// Shortened link, or `app_url` when shortening failed
    pub short_url: String,
    #[serde(default)]
    pub qr_code_data_url: Option<String>,
    #[serde(default)]
    pub conversation_log: Vec<ConversationEntry>,
    #[serde(default)]
    pub generation_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Owner-initiated edit of a published entry's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryMetadataUpdate {
    pub name: Option<String>,
    pub target_level: Option<String>,
    pub domain: Option<String>,
    pub sub_domain: Option<String>,
    pub pedagogical_explanation: Option<String>,
}

impl GalleryEntry {
    /// Projects the session's current applet into a new entry.
    ///
    /// The short link starts out equal to the long one.
    pub fn from_session(
        session: &Session,
        metadata: AppletMetadata,
        owner: &TeacherIdentity,
        school_code: impl Into<String>,
        app_url: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        let app_url = app_url.into();
        Self {
            id: None,
            owner_uid: owner.uid.clone(),
            owner_name: owner.display_name().to_string(),
            school_code: school_code.into(),
            metadata,
            short_url: app_url.clone(),
            app_url,
            qr_code_data_url: None,
            conversation_log: session.conversation_log.clone(),
            generation_count: session.generation_count,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, uid: &str) -> bool {
        self.owner_uid == uid
    }

    /// Fails unless `uid` owns this entry.
    pub fn ensure_owner(&self, uid: &str) -> Result<()> {
        if self.is_owned_by(uid) {
            Ok(())
        } else {
            Err(VibeError::unauthorized(format!(
                "gallery entry '{}' belongs to another teacher",
                self.id.as_deref().unwrap_or_default()
            )))
        }
    }

    /// Applies the fields present in `update`.
    pub fn update_metadata(&mut self, update: GalleryMetadataUpdate) {
        let metadata = &mut self.metadata;
        if let Some(name) = update.name {
            metadata.name = name;
        }
        if let Some(level) = update.target_level {
            metadata.target_level = level;
        }
        if let Some(domain) = update.domain {
            metadata.domain = domain;
        }
        if let Some(sub_domain) = update.sub_domain {
            metadata.sub_domain = sub_domain;
        }
        if let Some(explanation) = update.pedagogical_explanation {
            metadata.pedagogical_explanation = explanation;
        }
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
