//! Document ingestion: PDF extraction and page-aware chunking

mod chunker;
mod extractor;
mod images;

pub use chunker::WordChunker;
pub use extractor::{ExtractedDocument, PageText, PdfExtractor, TextExtractor};
pub use images::{extract_images, SavedImage};
