//! Catalog domain model.

use crate::error::{Result, ValidationError};
use crate::language::Language;
use serde::{Deserialize, Serialize};

/// A text available in both studio languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub he: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, he: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            he: he.into(),
        }
    }

    /// Text for `language`, or the other tongue when that one is blank.
    pub fn get(&self, language: Language) -> &str {
        let (wanted, other) = match language {
            Language::English => (&self.en, &self.he),
            Language::Hebrew => (&self.he, &self.en),
        };
        if wanted.trim().is_empty() { other } else { wanted }
    }
}

/// A teaching style the model is asked to adopt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    /// Icon class shown next to the title
    #[serde(default)]
    pub icon: String,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub system_prompt: LocalizedText,
}

/// A kind of activity the applet should be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub id: String,
    #[serde(default)]
    pub icon: String,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub instructions: LocalizedText,
    /// Suggested request text offered when the template is picked
    #[serde(default)]
    pub starter_content: LocalizedText,
}

/// All selectable personas and activity templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "persona")]
    pub personas: Vec<Persona>,
    #[serde(default, rename = "template")]
    pub templates: Vec<ActivityTemplate>,
}

impl Catalog {
    pub fn persona(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&ActivityTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Resolves a persona selection, reporting what is wrong with it.
    pub fn require_persona(&self, id: &str) -> Result<&Persona> {
        if id.trim().is_empty() {
            return Err(ValidationError::MissingPersona.into());
        }
        self.persona(id)
            .ok_or_else(|| ValidationError::UnknownPersona(id.to_string()).into())
    }

    /// Resolves a template selection, reporting what is wrong with it.
    pub fn require_template(&self, id: &str) -> Result<&ActivityTemplate> {
        if id.trim().is_empty() {
            return Err(ValidationError::MissingTemplate.into());
        }
        self.template(id)
            .ok_or_else(|| ValidationError::UnknownTemplate(id.to_string()).into())
    }

    /// Suggested request text for a template, if it exists and has one.
    pub fn starter_content(&self, template_id: &str, language: Language) -> Option<&str> {
        self.template(template_id)
            .map(|t| t.starter_content.get(language))
            .filter(|text| !text.is_empty())
    }

    /// Entries from `overrides` replace built-in entries with the same id;
    /// new ids are appended.
    pub fn merged_with(mut self, overrides: Catalog) -> Self {
        for persona in overrides.personas {
            match self.personas.iter_mut().find(|p| p.id == persona.id) {
                Some(existing) => *existing = persona,
                None => self.personas.push(persona),
            }
        }
        for template in overrides.templates {
            match self.templates.iter_mut().find(|t| t.id == template.id) {
                Some(existing) => *existing = template,
                None => self.templates.push(template),
            }
        }
        self
    }
}
