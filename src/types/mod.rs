//! Core data types: documents, chunks, and response shapes

pub mod document;
pub mod response;

pub use document::{Chunk, ContextBundle, Document, ImageRef, Section};
pub use response::{Answer, DocumentSummary, QuizQuestion};
