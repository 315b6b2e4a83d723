//! Applet domain model.

use serde::{Deserialize, Serialize};

/// Descriptive fields of an applet, written in the session language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppletMetadata {
    /// Short display name
    pub name: String,
    /// Intended grade or age level
    pub target_level: String,
    /// Main subject, e.g. "Math"
    pub domain: String,
    /// Topic within the subject, e.g. "Fractions"
    pub sub_domain: String,
    /// What the applet is meant to teach and how
    pub pedagogical_explanation: String,
}

impl AppletMetadata {
    /// Metadata with every field set to the empty string.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The artifact being produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applet {
    /// Complete single-file HTML document
    pub code: String,
    pub metadata: AppletMetadata,
}

impl Applet {
    pub fn new(code: impl Into<String>, metadata: AppletMetadata) -> Self {
        Self {
            code: code.into(),
            metadata,
        }
    }

    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }
}

/// Metadata as returned by the model, where any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPatch {
    pub name: Option<String>,
    pub target_level: Option<String>,
    pub domain: Option<String>,
    pub sub_domain: Option<String>,
    pub pedagogical_explanation: Option<String>,
}

impl MetadataPatch {
    /// Takes the fields as received, absent ones become the empty string
    /// (first generation).
    pub fn into_metadata(self) -> AppletMetadata {
        AppletMetadata {
            name: self.name.unwrap_or_default(),
            target_level: self.target_level.unwrap_or_default(),
            domain: self.domain.unwrap_or_default(),
            sub_domain: self.sub_domain.unwrap_or_default(),
            pedagogical_explanation: self.pedagogical_explanation.unwrap_or_default(),
        }
    }

    /// Applies the patch on top of `prior`, field by field.
    ///
    /// A field that is absent or blank keeps the prior value.
    pub fn merge_onto(self, prior: &AppletMetadata) -> AppletMetadata {
        fn pick(new: Option<String>, old: &str) -> String {
            match new {
                Some(value) if !value.trim().is_empty() => value,
                _ => old.to_string(),
            }
        }

        AppletMetadata {
            name: pick(self.name, &prior.name),
            target_level: pick(self.target_level, &prior.target_level),
            domain: pick(self.domain, &prior.domain),
            sub_domain: pick(self.sub_domain, &prior.sub_domain),
            pedagogical_explanation: pick(
                self.pedagogical_explanation,
                &prior.pedagogical_explanation,
            ),
        }
    }
}

impl From<AppletMetadata> for MetadataPatch {
    fn from(metadata: AppletMetadata) -> Self {
        Self {
            name: Some(metadata.name),
            target_level: Some(metadata.target_level),
            domain: Some(metadata.domain),
            sub_domain: Some(metadata.sub_domain),
            pedagogical_explanation: Some(metadata.pedagogical_explanation),
        }
    }
}

/// A successful model response, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedApplet {
    pub code: String,
    pub metadata: MetadataPatch,
}
