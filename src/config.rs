//! Configuration for the pipeline

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRagConfig {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Context cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// PDF extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl PageRagConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, failing fast on values that would
    /// make chunking loop forever
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()
    }
}

/// Word-window chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in words
    pub max_words: usize,
    /// Overlap between consecutive chunks in words (must be < max_words)
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_words: 1000,
            overlap: 100,
        }
    }
}

impl ChunkingConfig {
    /// Reject configurations where the chunk window cannot advance
    pub fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            return Err(Error::config("chunk max_words must be greater than zero"));
        }
        if self.overlap >= self.max_words {
            return Err(Error::config(format!(
                "chunk overlap ({}) must be less than max_words ({})",
                self.overlap, self.max_words
            )));
        }
        Ok(())
    }
}

/// LLM provider selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    /// Google Generative Language API
    #[default]
    Gemini,
    /// Local Ollama server
    Ollama,
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Which provider to use
    #[serde(default)]
    pub backend: LlmBackend,
    /// Generation model name
    pub model: String,
    /// API base URL (Gemini endpoint or Ollama server)
    pub base_url: String,
    /// API key; falls back to the GEMINI_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum output tokens
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::Gemini,
            model: "gemma-3-27b-it".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            temperature: 0.3,
            max_output_tokens: 2048,
            timeout_secs: 120,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from config or environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
    }
}

/// Context cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached context bundles
    pub max_entries: usize,
    /// TTL for cache entries in seconds
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 64,
            ttl_seconds: 3600,
        }
    }
}

/// PDF extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Directory name for extracted images inside the output folder
    pub images_dir: String,
    /// Filename for the raw extracted text dump
    pub raw_text_file: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            images_dir: "extracted_images".to_string(),
            raw_text_file: "result-hybrid-unprocessed.txt".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chunking_is_valid() {
        assert!(ChunkingConfig::default().validate().is_ok());
    }

    #[test]
    fn overlap_equal_to_max_is_rejected() {
        let config = ChunkingConfig {
            max_words: 100,
            overlap: 100,
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn overlap_above_max_is_rejected() {
        let config = ChunkingConfig {
            max_words: 50,
            overlap: 200,
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn zero_max_words_is_rejected() {
        let config = ChunkingConfig {
            max_words: 0,
            overlap: 0,
        };
        assert!(config.validate().is_err());
    }
}
