pub mod base;
pub mod gemini;
pub mod ollama;
pub mod timeout;

#[cfg(test)]
pub(crate) mod mock;

pub use base::{LlmMetadata, LlmProvider, LlmProviderError};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use timeout::generate_with_timeout;
