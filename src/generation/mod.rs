//! Prompt construction, citation extraction, and LLM output decoding

pub mod citation;
pub mod decode;
pub mod prompt;

pub use citation::extract_pages;
pub use decode::{decode_fenced_json, decode_json_array};
pub use prompt::PromptBuilder;
