//! Session domain model.
//!
//! A session is one teacher's continuous editing interaction. The transition
//! methods here are pure: they assume preconditions were checked and only
//! update in-memory state.

use super::message::ConversationEntry;
use super::state::SessionState;
use crate::applet::{Applet, AppletMetadata, GeneratedApplet};
use crate::generation::{CreateRequest, GenerationRequest};
use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Represents an editing session in the application's domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Storage id, assigned on first save
    pub id: Option<String>,
    /// Caller-supplied name, set on save
    pub name: Option<String>,
    /// Uid of the teacher that owns this session
    pub owner_uid: String,
    /// Language of generated metadata and acknowledgements
    pub language: Language,
    pub state: SessionState,
    /// Latest materialized applet, replaced on every successful generation
    pub current_applet: Option<Applet>,
    pub conversation_log: Vec<ConversationEntry>,
    pub generation_count: u32,
    /// Request that produced the first applet of this lineage
    pub original_prompt: Option<GenerationRequest>,
    /// Gallery entry created by the last publish, if any
    pub published_entry_id: Option<String>,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last changed (ISO 8601 format)
    pub updated_at: String,
}

impl Session {
    /// Creates an empty, unsaved session.
    pub fn new(owner_uid: impl Into<String>, language: Language) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: None,
            name: None,
            owner_uid: owner_uid.into(),
            language,
            state: SessionState::Empty,
            current_applet: None,
            conversation_log: Vec::new(),
            generation_count: 0,
            original_prompt: None,
            published_entry_id: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Starts a new lineage from a successful create.
    ///
    /// Metadata fields the model left out become empty strings.
    pub fn apply_create(&mut self, request: CreateRequest, generated: GeneratedApplet) {
        let applet = Applet::new(generated.code, generated.metadata.into_metadata());
        let ack = ConversationEntry::created_ack(request.language, &applet.metadata.name);

        self.language = request.language;
        self.conversation_log = vec![ConversationEntry::user(request.content.clone()), ack];
        self.current_applet = Some(applet);
        self.generation_count = 1;
        self.original_prompt = Some(GenerationRequest::Create(request));
        self.published_entry_id = None;
        self.state = SessionState::Created;
        self.touch();
    }

    /// Replaces the current applet with a refined one.
    ///
    /// Metadata fields the model left out keep their prior values. The new
    /// version is unpublished even if the previous one was not.
    pub fn apply_refine(&mut self, change_request: &str, generated: GeneratedApplet) {
        let prior = self
            .current_applet
            .as_ref()
            .map(|applet| applet.metadata.clone())
            .unwrap_or_default();
        let applet = Applet::new(generated.code, generated.metadata.merge_onto(&prior));

        self.generation_count += 1;
        self.conversation_log
            .push(ConversationEntry::user(change_request));
        self.conversation_log.push(ConversationEntry::refined_ack(
            self.language,
            &applet.metadata.name,
            self.generation_count,
        ));
        self.current_applet = Some(applet);
        self.published_entry_id = None;
        self.state = SessionState::Refining;
        self.touch();
    }

    /// Adopts externally authored code as a fresh lineage.
    pub fn apply_external_code(&mut self, code: impl Into<String>) {
        self.id = None;
        self.name = None;
        self.current_applet = Some(Applet::new(code, AppletMetadata::empty()));
        self.conversation_log.clear();
        self.generation_count = 0;
        self.original_prompt = None;
        self.published_entry_id = None;
        self.state = SessionState::Created;
        self.touch();
    }

    /// Records a successful publish of the current applet.
    pub fn mark_published(&mut self, entry_id: impl Into<String>) {
        self.published_entry_id = Some(entry_id.into());
        self.state = SessionState::Published;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
