//! Prompt composition.
//!
//! Builds the full instruction text sent to the model. Composition is a pure
//! function of the request: no clock, no randomness, no I/O.

use super::request::{CreateRequest, GenerationRequest, RefineRequest};
use crate::error::Result;
use minijinja::{AutoEscape, Environment, context};

/// Persona used when the request carries none.
pub const DEFAULT_PERSONA: &str = "You are a friendly, encouraging teacher. You explain ideas simply, use positive feedback, and celebrate every student's progress.";

/// Activity template used when the request carries none.
pub const DEFAULT_TEMPLATE: &str = "Create an interactive educational activity.";

/// Request text used when the teacher left the description empty.
pub const DEFAULT_CONTENT: &str = "Create an engaging, interactive educational applet suitable for a classroom lesson.";

/// Section headings, in the order they appear in composed prompts.
pub mod section {
    pub const PERSONA: &str = "### TEACHING PERSONA";
    pub const TEMPLATE: &str = "### ACTIVITY TEMPLATE";
    pub const CONTENT: &str = "### TEACHER'S REQUEST";
    pub const METADATA: &str = "### CURRENT APPLET METADATA";
    pub const CODE: &str = "### CURRENT APPLET CODE";
    pub const CHANGE_REQUEST: &str = "### REQUESTED CHANGES";
}

const TECHNICAL_REQUIREMENTS: &str = "\
- Deliver exactly one complete, self-contained HTML document.
- All CSS and JavaScript must be inline in that document. TailwindCSS may be loaded from its CDN; no other external files.
- The layout must be responsive and usable on mobile phones and tablets.
- Comment the code so another teacher can follow and adapt it.
- The activity must be pedagogically sound: clear instructions, immediate feedback, age-appropriate language.";

const CREATE_TEMPLATE: &str = "\
You are an expert developer specializing in interactive, single-file HTML educational applets for teachers.

Technical requirements:
{{ requirements }}

Your entire response must be a single JSON object matching the provided schema. All text inside the metadata object must be in {{ language }}.

### TEACHING PERSONA
{{ persona }}

### ACTIVITY TEMPLATE
{{ template }}

### TEACHER'S REQUEST
{{ content }}";

const REFINE_TEMPLATE: &str = "\
You are an expert developer specializing in interactive, single-file HTML educational applets for teachers. Your task is to modify an existing applet according to the teacher's requested changes. Keep everything that the teacher did not ask to change.

Technical requirements:
{{ requirements }}

Your entire response must be a single JSON object matching the provided schema and must contain the complete updated HTML document, not a diff. All text inside the metadata object must be in {{ language }}.

### CURRENT APPLET METADATA
App name: {{ name }}
Target level: {{ target_level }}
Domain: {{ domain }}
Sub-domain: {{ sub_domain }}
Pedagogical explanation: {{ pedagogical_explanation }}

### CURRENT APPLET CODE
```html
{{ code }}
```

### REQUESTED CHANGES
{{ change_request }}";

/// Renders generation requests into model instructions.
pub struct PromptComposer {
    env: Environment<'static>,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptComposer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Applet code is markup and must reach the model verbatim.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }

    /// Produces the instruction text for `request`.
    pub fn compose(&self, request: &GenerationRequest) -> Result<String> {
        match request {
            GenerationRequest::Create(create) => self.compose_create(create),
            GenerationRequest::Refine(refine) => self.compose_refine(refine),
        }
    }

    fn compose_create(&self, request: &CreateRequest) -> Result<String> {
        let rendered = self.env.render_str(
            CREATE_TEMPLATE,
            context! {
                requirements => TECHNICAL_REQUIREMENTS,
                language => request.language.display_name(),
                persona => or_default(&request.persona, DEFAULT_PERSONA),
                template => or_default(&request.template, DEFAULT_TEMPLATE),
                content => or_default(&request.content, DEFAULT_CONTENT),
            },
        )?;
        Ok(rendered)
    }

    fn compose_refine(&self, request: &RefineRequest) -> Result<String> {
        let metadata = &request.prior_applet.metadata;
        let rendered = self.env.render_str(
            REFINE_TEMPLATE,
            context! {
                requirements => TECHNICAL_REQUIREMENTS,
                language => request.language.display_name(),
                name => metadata.name.as_str(),
                target_level => metadata.target_level.as_str(),
                domain => metadata.domain.as_str(),
                sub_domain => metadata.sub_domain.as_str(),
                pedagogical_explanation => metadata.pedagogical_explanation.as_str(),
                code => request.prior_applet.code.as_str(),
                change_request => request.change_request.as_str(),
            },
        )?;
        Ok(rendered)
    }
}

fn or_default<'a>(value: &'a str, default: &'static str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { default } else { trimmed }
}
