//! Teacher identity and the authorization gate.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Institution code recorded when the roster has none for a teacher.
pub const DEFAULT_SCHOOL_CODE: &str = "000000000";

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherIdentity {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl TeacherIdentity {
    /// Builds an identity whose uid is derived from the normalized email, so
    /// the same address always maps to the same uid.
    pub fn from_email(email: &str) -> Self {
        let email = normalize_email(email);
        let uid = Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{}", email).as_bytes());
        Self {
            uid: uid.to_string(),
            email,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display name, or the local part of the email when none is set.
    pub fn display_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Roster data about a registered teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherProfile {
    pub email: String,
    #[serde(default)]
    pub school_code: Option<String>,
}

impl TeacherProfile {
    pub fn school_code(&self) -> &str {
        self.school_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .unwrap_or(DEFAULT_SCHOOL_CODE)
    }
}

/// Lower-cases and trims an email for comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Verifies that a caller is a registered teacher.
///
/// Checked before create, refine and publish. Email comparison is
/// case-insensitive.
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    async fn is_authorized_creator(&self, identity: &TeacherIdentity) -> Result<bool>;

    /// Roster entry for the caller, if registered.
    async fn teacher_profile(&self, identity: &TeacherIdentity) -> Result<Option<TeacherProfile>>;
}
