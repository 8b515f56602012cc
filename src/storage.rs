//! Extraction output persistence
//!
//! One extraction run produces a timestamped folder next to the source
//! PDF holding the raw text dump, extracted images, and the structured
//! `extracted_data.json` the rest of the pipeline consumes.

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::ingestion::{extract_images, ExtractedDocument, SavedImage, TextExtractor};
use crate::types::{Document, ImageRef, Section};

/// Result of a full PDF extraction run
#[derive(Debug)]
pub struct ExtractionOutput {
    /// Folder created for this run
    pub folder: PathBuf,
    /// Path of `extracted_data.json`
    pub document_path: PathBuf,
    /// The structured document
    pub document: Document,
}

/// Extract a PDF to a timestamped output folder
///
/// Folder name is the PDF stem plus a local timestamp, so repeated runs
/// on the same file never collide.
pub fn extract_to_folder(
    extractor: &dyn TextExtractor,
    pdf_path: &Path,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput> {
    let data = std::fs::read(pdf_path)?;
    let stem = pdf_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::pdf(format!("bad PDF path: {}", pdf_path.display())))?;

    let timestamp = Local::now().format("%m%d%Y-%H%M%S%f");
    let folder = pdf_path.with_file_name(format!("{}{}", stem, timestamp));
    std::fs::create_dir_all(&folder)?;

    tracing::info!(folder = %folder.display(), "extracting PDF");

    let extracted = extractor.extract(&data)?;
    std::fs::write(folder.join(&config.raw_text_file), extracted.full_text())?;

    let images_dir = folder.join(&config.images_dir);
    let images = extract_images(&data, &images_dir).unwrap_or_else(|e| {
        tracing::warn!("image extraction failed: {}", e);
        Vec::new()
    });

    let document = build_document(stem, &extracted, &images);
    let document_path = folder.join("extracted_data.json");
    write_document(&document, &document_path)?;

    Ok(ExtractionOutput {
        folder,
        document_path,
        document,
    })
}

/// Assemble the structured document from extracted text and images
fn build_document(title: &str, extracted: &ExtractedDocument, images: &[SavedImage]) -> Document {
    let sections = extracted
        .pages
        .iter()
        .map(|page| Section {
            page: Some(page.number),
            text: page.text.trim().to_string(),
            images: images
                .iter()
                .filter(|img| img.page == page.number)
                .map(|img| ImageRef {
                    filename: img.path.display().to_string(),
                    description: "Extracted image".to_string(),
                })
                .collect(),
        })
        .collect();

    Document {
        title: Some(title.to_string()),
        sections,
    }
}

/// Write a document as pretty-printed JSON
pub fn write_document(document: &Document, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "wrote document JSON");
    Ok(())
}

/// Load a document from a JSON file, validating its structure
pub fn load_document(path: &Path) -> Result<Document> {
    Document::load(path)
}
