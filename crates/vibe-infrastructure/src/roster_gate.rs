//! Authorization gate backed by a roster file.
//!
//! ```toml
//! [[teacher]]
//! email = "dana@school.org"
//! school_code = "123456789"
//! ```

use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vibe_core::auth::{AuthorizationGate, TeacherIdentity, TeacherProfile, normalize_email};
use vibe_core::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default, rename = "teacher")]
    pub teachers: Vec<TeacherProfile>,
}

impl Roster {
    pub fn find(&self, email: &str) -> Option<&TeacherProfile> {
        let wanted = normalize_email(email);
        self.teachers
            .iter()
            .find(|teacher| normalize_email(&teacher.email) == wanted)
    }
}

enum RosterSource {
    File(AtomicTomlFile<Roster>),
    Fixed(Roster),
}

/// Gate that admits teachers listed in the roster.
///
/// The file is re-read on every check so roster edits apply without a
/// restart. A missing file admits nobody.
pub struct RosterAuthorizationGate {
    source: RosterSource,
}

impl RosterAuthorizationGate {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: RosterSource::File(AtomicTomlFile::new(path)),
        }
    }

    pub fn from_roster(roster: Roster) -> Self {
        Self {
            source: RosterSource::Fixed(roster),
        }
    }

    fn roster(&self) -> Result<Roster> {
        match &self.source {
            RosterSource::File(file) => Ok(file.load()?.unwrap_or_default()),
            RosterSource::Fixed(roster) => Ok(roster.clone()),
        }
    }

    /// Adds or updates a teacher in the roster file.
    pub fn register(&self, profile: TeacherProfile) -> Result<()> {
        match &self.source {
            RosterSource::File(file) => file.update(Roster::default(), |roster| {
                let email = normalize_email(&profile.email);
                roster
                    .teachers
                    .retain(|teacher| normalize_email(&teacher.email) != email);
                roster.teachers.push(TeacherProfile {
                    email,
                    school_code: profile.school_code,
                });
                Ok(())
            }),
            RosterSource::Fixed(_) => Err(vibe_core::VibeError::config(
                "Cannot register teachers in a fixed roster",
            )),
        }
    }
}

#[async_trait]
impl AuthorizationGate for RosterAuthorizationGate {
    async fn is_authorized_creator(&self, identity: &TeacherIdentity) -> Result<bool> {
        let authorized = self.roster()?.find(&identity.email).is_some();
        if !authorized {
            tracing::info!(uid = %identity.uid, "Caller is not on the teacher roster");
        }
        Ok(authorized)
    }

    async fn teacher_profile(&self, identity: &TeacherIdentity) -> Result<Option<TeacherProfile>> {
        Ok(self.roster()?.find(&identity.email).cloned())
    }
}
