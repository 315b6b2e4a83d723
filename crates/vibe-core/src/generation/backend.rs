//! Generative backend port.

use super::contract::OutputContract;
use crate::error::Result;

/// A one-shot, non-streaming generative model.
///
/// Implementations return the model's raw text. Transport and HTTP failures
/// must be reported as [`crate::VibeError::BackendUnavailable`]; checking the
/// text against the contract is the caller's job.
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Sends `prompt` and asks the model to answer in the shape of `contract`.
    async fn complete(&self, prompt: &str, contract: &OutputContract) -> Result<String>;

    /// Identifier of the backing model, for logs.
    fn model_name(&self) -> &str;
}
