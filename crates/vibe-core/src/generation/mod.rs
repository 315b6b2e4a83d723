//! Generation domain module.
//!
//! # Module Structure
//!
//! - `request`: what the caller asks for (`GenerationRequest`)
//! - `composer`: turns a request into instruction text (`PromptComposer`)
//! - `contract`: the structured-output schema and response parser (`OutputContract`)
//! - `backend`: the generative model port (`GenerativeBackend`)
//! - `generator`: the port the session state machine calls (`AppletGenerator`)

mod backend;
mod composer;
mod contract;
mod generator;
mod request;

pub use backend::GenerativeBackend;
pub use composer::{
    DEFAULT_CONTENT, DEFAULT_PERSONA, DEFAULT_TEMPLATE, PromptComposer, section,
};
pub use contract::{OutputContract, field};
pub use generator::AppletGenerator;
pub use request::{CreateRequest, GenerationMode, GenerationRequest, RefineRequest};
