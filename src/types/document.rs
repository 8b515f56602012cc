//! Document and chunk types with page tracking for citations

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::{Error, Result};

/// A document as an ordered sequence of page sections
///
/// This is the `extracted_data.json` shape produced by the extractor:
/// `{"document_title": ..., "sections": [{"page", "text", "images"}]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document title (optional)
    #[serde(default, rename = "document_title")]
    pub title: Option<String>,
    /// Ordered page sections
    pub sections: Vec<Section>,
}

/// A single page section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// 1-based page number; when absent, position in the sequence is used
    #[serde(default)]
    pub page: Option<u32>,
    /// Raw page text (may be empty, e.g. a scanned page)
    #[serde(default)]
    pub text: String,
    /// Images extracted from this page
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Reference to an image extracted from a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    /// Path to the saved image file
    pub filename: String,
    /// Short description
    #[serde(default)]
    pub description: String,
}

impl Document {
    /// Parse a document from a JSON string
    ///
    /// A missing or non-array `sections` key is a document error, not a
    /// panic. `name` identifies the source in error messages.
    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Error::document(name, format!("not valid JSON: {}", e)))?;

        if value.get("sections").map(|s| s.is_array()) != Some(true) {
            return Err(Error::document(name, "'sections' key missing"));
        }

        serde_json::from_value(value)
            .map_err(|e| Error::document(name, format!("malformed sections: {}", e)))
    }

    /// Load a document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&name, &json)
    }

    /// Resolve the 1-based page number for the section at `index`
    pub fn page_of(&self, index: usize) -> u32 {
        self.sections
            .get(index)
            .and_then(|s| s.page)
            .unwrap_or(index as u32 + 1)
    }

    /// Join all non-empty section text with blank lines
    pub fn full_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Stable identity for cache keying, derived from section text
    pub fn identity(&self) -> String {
        let mut hasher = Sha256::new();
        for (i, section) in self.sections.iter().enumerate() {
            hasher.update(self.page_of(i).to_le_bytes());
            hasher.update(section.text.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

/// A bounded word-window of page text with page attribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// 1-based page the text came from
    pub page: u32,
    /// Chunk text
    pub text: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

/// Ordered chunk sequence assembled for one query
///
/// Order is page-ascending then chunk-ascending, i.e. the insertion order
/// of document traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextBundle {
    chunks: Vec<Chunk>,
}

impl ContextBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk, preserving insertion order
    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Chunks in insertion order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks in the bundle
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the bundle has no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl FromIterator<Chunk> for ContextBundle {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ContextBundle {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
