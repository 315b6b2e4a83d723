//! Applet generator port used by the session state machine.

use super::request::GenerationRequest;
use crate::applet::GeneratedApplet;
use crate::error::Result;

/// Turns a generation request into a parsed model response.
///
/// Exactly one backend call per invocation; failures are surfaced, never
/// retried or masked.
#[async_trait::async_trait]
pub trait AppletGenerator: Send + Sync {
    async fn invoke(&self, request: &GenerationRequest) -> Result<GeneratedApplet>;
}
