//! Persisted form of a session.

use super::message::{ConversationEntry, Speaker};
use super::model::Session;
use super::state::SessionState;
use crate::applet::{Applet, AppletMetadata};
use crate::generation::GenerationRequest;
use crate::language::Language;
use serde::{Deserialize, Serialize};

/// A logged message as stored.
///
/// Older records hold bare strings, or objects without a speaker; those are
/// attributed by alternating position when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredMessage {
    Attributed {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speaker: Option<Speaker>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
    Plain(String),
}

impl StoredMessage {
    pub fn text(&self) -> &str {
        match self {
            StoredMessage::Attributed { text, .. } => text,
            StoredMessage::Plain(text) => text,
        }
    }

    fn into_entry(self, index: usize, fallback_timestamp: &str) -> ConversationEntry {
        match self {
            StoredMessage::Attributed {
                text,
                speaker,
                timestamp,
            } => ConversationEntry {
                speaker: speaker.unwrap_or_else(|| Speaker::alternating(index)),
                text,
                timestamp: timestamp.unwrap_or_else(|| fallback_timestamp.to_string()),
            },
            StoredMessage::Plain(text) => ConversationEntry {
                speaker: Speaker::alternating(index),
                text,
                timestamp: fallback_timestamp.to_string(),
            },
        }
    }
}

impl From<&ConversationEntry> for StoredMessage {
    fn from(entry: &ConversationEntry) -> Self {
        StoredMessage::Attributed {
            text: entry.text.clone(),
            speaker: Some(entry.speaker),
            timestamp: Some(entry.timestamp.clone()),
        }
    }
}

/// A saved work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Assigned by the store on first upsert
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub owner_uid: String,
    #[serde(default)]
    pub language: Language,
    pub code: String,
    #[serde(default)]
    pub metadata: AppletMetadata,
    #[serde(default)]
    pub messages: Vec<StoredMessage>,
    #[serde(default)]
    pub generation_count: u32,
    #[serde(default)]
    pub original_prompt: Option<GenerationRequest>,
    #[serde(default)]
    pub published_entry_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl SessionSnapshot {
    /// Captures `session` under `name`.
    ///
    /// Returns `None` when the session has no applet yet.
    pub fn capture(session: &Session, name: &str) -> Option<Self> {
        let applet = session.current_applet.as_ref()?;
        Some(Self {
            id: session.id.clone(),
            name: name.to_string(),
            owner_uid: session.owner_uid.clone(),
            language: session.language,
            code: applet.code.clone(),
            metadata: applet.metadata.clone(),
            messages: session.conversation_log.iter().map(StoredMessage::from).collect(),
            generation_count: session.generation_count,
            original_prompt: session.original_prompt.clone(),
            published_entry_id: session.published_entry_id.clone(),
            created_at: session.created_at.clone(),
            updated_at: session.updated_at.clone(),
        })
    }

    /// Rebuilds an in-memory session from this snapshot.
    ///
    /// A snapshot carrying a gallery entry id was saved right after a
    /// publish and comes back as `Published`.
    pub fn into_session(self) -> Session {
        let state = if self.published_entry_id.is_some() {
            SessionState::Published
        } else if self.generation_count > 1 {
            SessionState::Refining
        } else {
            SessionState::Created
        };
        let updated_at = self.updated_at;
        let conversation_log = self
            .messages
            .into_iter()
            .enumerate()
            .map(|(index, message)| message.into_entry(index, &updated_at))
            .collect();

        Session {
            id: self.id,
            name: Some(self.name),
            owner_uid: self.owner_uid,
            language: self.language,
            state,
            current_applet: Some(Applet::new(self.code, self.metadata)),
            conversation_log,
            generation_count: self.generation_count,
            original_prompt: self.original_prompt,
            published_entry_id: self.published_entry_id,
            created_at: self.created_at,
            updated_at,
        }
    }
}
