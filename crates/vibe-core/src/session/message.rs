//! Conversation log types.

use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Who authored a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The teacher.
    User,
    /// The studio, acknowledging a generation.
    System,
}

impl Speaker {
    /// Speaker inferred from position in a log that alternates user/system,
    /// starting with the user.
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 { Speaker::User } else { Speaker::System }
    }
}

/// A single entry in a session's conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub speaker: Speaker,
    pub text: String,
    /// Timestamp when the entry was created (ISO 8601 format).
    pub timestamp: String,
}

impl ConversationEntry {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Speaker::System, text)
    }

    /// Acknowledgement logged after a successful first generation.
    pub fn created_ack(language: Language, app_name: &str) -> Self {
        let text = match language {
            Language::English => format!("Created the applet \"{}\".", app_name),
            Language::Hebrew => format!("היישומון \"{}\" נוצר בהצלחה.", app_name),
        };
        Self::system(text)
    }

    /// Acknowledgement logged after a successful refinement.
    pub fn refined_ack(language: Language, app_name: &str, generation: u32) -> Self {
        let text = match language {
            Language::English => format!(
                "Updated the applet \"{}\" (version {}).",
                app_name, generation
            ),
            Language::Hebrew => format!(
                "היישומון \"{}\" עודכן (גרסה {}).",
                app_name, generation
            ),
        };
        Self::system(text)
    }
}
