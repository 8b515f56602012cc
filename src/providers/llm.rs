//! LLM provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Opaque text-generation capability
///
/// Implementations:
/// - `GeminiClient`: Google Generative Language API
/// - `OllamaLlm`: local Ollama server
///
/// One prompt in, free text out. Failures surface as `Error::Llm`; there
/// is no retry or cancellation at this layer.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate free text from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
