//! Outbound interaction with generative and link-shortening services.

pub mod bitly_shortener;
pub mod config;
pub mod gemini_backend;
pub mod invoker;

pub use bitly_shortener::BitlyShortener;
pub use config::{BitlyConfig, GeminiConfig, SecretConfig, load_secret_config};
pub use gemini_backend::GeminiBackend;
pub use invoker::GenerationInvoker;
