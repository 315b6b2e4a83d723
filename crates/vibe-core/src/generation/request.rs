//! Generation request types.

use crate::applet::Applet;
use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Payload for a brand-new applet.
///
/// Fields hold resolved text, not catalog ids. Empty fields are allowed here;
/// the composer substitutes defaults for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Teaching-style instructions
    pub persona: String,
    /// Activity-type instructions
    pub template: String,
    /// The teacher's free-form ask
    pub content: String,
    pub language: Language,
}

/// Payload for modifying an existing applet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineRequest {
    pub prior_applet: Applet,
    pub change_request: String,
    pub language: Language,
}

/// One call to the generation invoker.
///
/// Being an enum, a request carries exactly one payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GenerationRequest {
    Create(CreateRequest),
    Refine(RefineRequest),
}

/// Discriminant of [`GenerationRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    Create,
    Refine,
}

impl GenerationRequest {
    pub fn create(
        persona: impl Into<String>,
        template: impl Into<String>,
        content: impl Into<String>,
        language: Language,
    ) -> Self {
        Self::Create(CreateRequest {
            persona: persona.into(),
            template: template.into(),
            content: content.into(),
            language,
        })
    }

    pub fn refine(prior_applet: Applet, change_request: impl Into<String>, language: Language) -> Self {
        Self::Refine(RefineRequest {
            prior_applet,
            change_request: change_request.into(),
            language,
        })
    }

    pub fn mode(&self) -> GenerationMode {
        match self {
            Self::Create(_) => GenerationMode::Create,
            Self::Refine(_) => GenerationMode::Refine,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::Create(request) => request.language,
            Self::Refine(request) => request.language,
        }
    }
}
