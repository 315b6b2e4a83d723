//! Target natural language for generated metadata.
//!
//! Two tongues are recognized. English is the primary one and must be asked
//! for explicitly with its code; every other input resolves to Hebrew.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the model is told to write applet metadata in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Primary tongue, code `en`.
    #[serde(rename = "en", alias = "english")]
    English,
    /// Secondary tongue, code `he`. Also the fallback for unrecognized input.
    #[serde(rename = "he", alias = "hebrew")]
    Hebrew,
}

impl Default for Language {
    fn default() -> Self {
        Language::FALLBACK
    }
}

/// Outcome of [`Language::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLanguage {
    pub language: Language,
    /// True when the input was not a recognized code and the fallback was used.
    pub fell_back: bool,
}

impl Language {
    /// Language used when the caller's code is not recognized.
    pub const FALLBACK: Language = Language::Hebrew;

    /// Two-letter code used on the wire and in config files.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hebrew => "he",
        }
    }

    /// Name interpolated into prompts and schema descriptions.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hebrew => "Hebrew",
        }
    }

    /// Resolves a caller-supplied code, falling back to [`Language::FALLBACK`].
    ///
    /// The fallback is reported in the result and logged so a typo such as
    /// `"eng"` does not go unnoticed.
    pub fn resolve(code: &str) -> ResolvedLanguage {
        match code.parse::<Language>() {
            Ok(language) => ResolvedLanguage {
                language,
                fell_back: false,
            },
            Err(_) => {
                tracing::warn!(
                    input = code,
                    fallback = Language::FALLBACK.code(),
                    "Unrecognized language code, using fallback"
                );
                ResolvedLanguage {
                    language: Language::FALLBACK,
                    fell_back: true,
                }
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Strict parse: only the exact lowercase codes are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::English),
            "he" => Ok(Language::Hebrew),
            other => Err(format!("Unsupported language code: '{}'", other)),
        }
    }
}
