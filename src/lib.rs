//! pagerag: page-cited document Q&A
//!
//! Extracts text and images from PDFs into a sectioned JSON document,
//! chunks page text into overlapping word-windows, and asks an LLM
//! questions about the document, attributing answers back to source
//! pages via `(Page n)` citations in the response. Also produces
//! structured summaries and multiple-choice quizzes.
//!
//! PDF parsing and the LLM call sit behind narrow traits
//! (`TextExtractor`, `LlmProvider`) so the pipeline itself is testable
//! without the real services.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod storage;
pub mod types;

pub use cache::ContextCache;
pub use config::PageRagConfig;
pub use engine::ChatEngine;
pub use error::{Error, Result};
pub use types::{Answer, Chunk, ContextBundle, Document, DocumentSummary, QuizQuestion, Section};
