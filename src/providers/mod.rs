//! Provider abstractions for text generation
//!
//! Trait-based seam so the pipeline can switch between the Gemini API
//! and a local Ollama server, or a stub in tests.

pub mod gemini;
pub mod llm;
pub mod ollama;

pub use gemini::GeminiClient;
pub use llm::LlmProvider;
pub use ollama::OllamaLlm;

use std::sync::Arc;

use crate::config::{LlmBackend, LlmConfig};
use crate::error::Result;

/// Build the configured LLM provider
pub fn create_llm_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.backend {
        LlmBackend::Gemini => Arc::new(GeminiClient::new(config)?),
        LlmBackend::Ollama => Arc::new(OllamaLlm::new(config)?),
    };
    tracing::info!(provider = provider.name(), model = provider.model(), "LLM provider ready");
    Ok(provider)
}
