//! Structured-output contract.
//!
//! The schema the model must fill in, parameterized by target language, and
//! the parser that checks a raw response against it.

use crate::applet::{GeneratedApplet, MetadataPatch};
use crate::error::{Result, VibeError};
use crate::language::Language;
use serde_json::{Map, Value, json};

/// Wire names of the contracted fields.
pub mod field {
    pub const CODE: &str = "htmlCode";
    pub const METADATA: &str = "metadata";
    pub const NAME: &str = "appName";
    pub const TARGET_LEVEL: &str = "gradeLevel";
    pub const DOMAIN: &str = "domain";
    pub const SUB_DOMAIN: &str = "subDomain";
    pub const PEDAGOGY: &str = "pedagogicalExplanation";
}

/// An immutable output contract for one target language.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputContract {
    language: Language,
    schema: Value,
}

impl OutputContract {
    /// Builds the contract, telling the model per metadata field which
    /// language to answer in.
    pub fn for_language(language: Language) -> Self {
        let lang = language.display_name();
        let schema = json!({
            "type": "OBJECT",
            "properties": {
                "htmlCode": {
                    "type": "STRING",
                    "description": "The complete, single-file HTML code for the educational applet. All CSS and JavaScript must be inline within the HTML file."
                },
                "metadata": {
                    "type": "OBJECT",
                    "properties": {
                        "appName": {
                            "type": "STRING",
                            "description": format!("A short, descriptive name for the app in {lang}.")
                        },
                        "gradeLevel": {
                            "type": "STRING",
                            "description": format!("The target grade level, e.g. 'Grade 3', in {lang}.")
                        },
                        "domain": {
                            "type": "STRING",
                            "description": format!("The main educational subject in {lang}, e.g. 'Math'.")
                        },
                        "subDomain": {
                            "type": "STRING",
                            "description": format!("The specific topic within the domain in {lang}, e.g. 'Fractions'.")
                        },
                        "pedagogicalExplanation": {
                            "type": "STRING",
                            "description": format!("A brief explanation of the pedagogical goal of the applet in {lang}.")
                        }
                    }
                }
            },
            "required": ["htmlCode", "metadata"]
        });

        Self { language, schema }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The schema in the backend's `responseSchema` dialect.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Parses a raw model response.
    ///
    /// Fails with [`VibeError::MalformedResponse`] when the text is not JSON,
    /// `htmlCode` is missing or blank, `metadata` is missing, or any metadata
    /// field is present but not a string.
    pub fn parse_response(&self, raw: &str) -> Result<GeneratedApplet> {
        let value: Value = serde_json::from_str(strip_code_fence(raw))
            .map_err(|e| VibeError::malformed(format!("response is not valid JSON: {}", e)))?;

        let object = value
            .as_object()
            .ok_or_else(|| VibeError::malformed("response is not a JSON object"))?;

        let code = match object.get(field::CODE) {
            Some(Value::String(code)) if !code.trim().is_empty() => code.clone(),
            Some(Value::String(_)) => {
                return Err(VibeError::malformed(format!("'{}' is empty", field::CODE)));
            }
            Some(_) => {
                return Err(VibeError::malformed(format!(
                    "'{}' is not a string",
                    field::CODE
                )));
            }
            None => {
                return Err(VibeError::malformed(format!("'{}' is missing", field::CODE)));
            }
        };

        let metadata = object
            .get(field::METADATA)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                VibeError::malformed(format!("'{}' object is missing", field::METADATA))
            })?;

        Ok(GeneratedApplet {
            code,
            metadata: MetadataPatch {
                name: string_field(metadata, field::NAME)?,
                target_level: string_field(metadata, field::TARGET_LEVEL)?,
                domain: string_field(metadata, field::DOMAIN)?,
                sub_domain: string_field(metadata, field::SUB_DOMAIN)?,
                pedagogical_explanation: string_field(metadata, field::PEDAGOGY)?,
            },
        })
    }
}

fn string_field(metadata: &Map<String, Value>, name: &str) -> Result<Option<String>> {
    match metadata.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(VibeError::malformed(format!(
            "metadata field '{}' is not a string",
            name
        ))),
    }
}

/// Some models wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
