//! Generation invoker.
//!
//! Composes the prompt, attaches the output contract, makes exactly one
//! backend call and parses the answer. Nothing is retried and nothing is
//! stored.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use vibe_core::applet::GeneratedApplet;
use vibe_core::error::Result;
use vibe_core::generation::{
    AppletGenerator, GenerationRequest, GenerativeBackend, OutputContract, PromptComposer,
};

pub struct GenerationInvoker {
    backend: Arc<dyn GenerativeBackend>,
    composer: PromptComposer,
}

impl GenerationInvoker {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self {
            backend,
            composer: PromptComposer::new(),
        }
    }
}

#[async_trait]
impl AppletGenerator for GenerationInvoker {
    async fn invoke(&self, request: &GenerationRequest) -> Result<GeneratedApplet> {
        let prompt = self.composer.compose(request)?;
        let contract = OutputContract::for_language(request.language());
        let started = Instant::now();

        tracing::info!(
            target: "vibe::generation",
            mode = ?request.mode(),
            language = request.language().code(),
            model = self.backend.model_name(),
            prompt_len = prompt.len(),
            "Invoking generative backend"
        );

        let outcome = match self.backend.complete(&prompt, &contract).await {
            Ok(raw) => contract.parse_response(&raw),
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(applet) => tracing::info!(
                target: "vibe::generation",
                elapsed_ms = started.elapsed().as_millis() as u64,
                code_len = applet.code.len(),
                "Generation succeeded"
            ),
            Err(err) => tracing::warn!(
                target: "vibe::generation",
                elapsed_ms = started.elapsed().as_millis() as u64,
                retryable = err.is_retryable(),
                "Generation failed: {}",
                err
            ),
        }

        outcome
    }
}
