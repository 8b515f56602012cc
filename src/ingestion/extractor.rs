//! PDF text extraction behind a narrow capability trait
//!
//! Page-level text comes from lopdf; when that fails for the whole
//! document, pdf-extract is used as a fallback and the result is kept as
//! a single section.

use crate::error::{Error, Result};

/// Text extracted from one page
#[derive(Debug, Clone)]
pub struct PageText {
    /// 1-based page number
    pub number: u32,
    /// Extracted text; empty for pages with no text layer (e.g. scans)
    pub text: String,
}

/// A document's extracted text, page by page
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Pages in ascending order
    pub pages: Vec<PageText>,
}

impl ExtractedDocument {
    /// Whether any page yielded text
    pub fn has_text(&self) -> bool {
        self.pages.iter().any(|p| !p.text.trim().is_empty())
    }

    /// Full text, pages joined by newlines
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Capability for turning raw document bytes into per-page text
///
/// The pipeline only depends on this trait, so it can be exercised
/// without a real PDF library behind it.
pub trait TextExtractor: Send + Sync {
    /// Extract per-page text from raw document bytes
    fn extract(&self, data: &[u8]) -> Result<ExtractedDocument>;
}

/// PDF extractor built on lopdf with a pdf-extract fallback
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Per-page extraction via lopdf
    fn extract_by_page(&self, data: &[u8]) -> Result<ExtractedDocument> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| Error::pdf(e.to_string()))?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        if page_numbers.is_empty() {
            return Err(Error::pdf("document has no pages"));
        }

        let mut pages = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            let text = match doc.extract_text(&[number]) {
                Ok(text) => cleanup_text(&text),
                Err(e) => {
                    tracing::warn!(page = number, "page text extraction failed: {}", e);
                    String::new()
                }
            };
            if text.is_empty() {
                tracing::warn!(page = number, "no text layer on page, likely a scanned image");
            }
            pages.push(PageText { number, text });
        }

        pages.sort_by_key(|p| p.number);
        Ok(ExtractedDocument { pages })
    }

    /// Whole-document fallback via pdf-extract
    fn extract_whole(&self, data: &[u8]) -> Result<ExtractedDocument> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::pdf(e.to_string()))?;
        let text = cleanup_text(&text);

        Ok(ExtractedDocument {
            pages: vec![PageText { number: 1, text }],
        })
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, data: &[u8]) -> Result<ExtractedDocument> {
        match self.extract_by_page(data) {
            Ok(extracted) if extracted.has_text() => Ok(extracted),
            Ok(_) | Err(_) => {
                tracing::warn!("page-level extraction yielded nothing, trying pdf-extract");
                let extracted = self.extract_whole(data)?;
                if !extracted.has_text() {
                    return Err(Error::pdf("no text content could be extracted"));
                }
                Ok(extracted)
            }
        }
    }
}

/// Normalize extracted text: drop NULs, trim lines, drop empty lines
fn cleanup_text(text: &str) -> String {
    text.replace('\0', "")
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_strips_nuls_and_blank_lines() {
        let raw = "  first line \n\n\0\nsecond\0 line\n   \n";
        assert_eq!(cleanup_text(raw), "first line\nsecond line");
    }

    #[test]
    fn has_text_ignores_whitespace_pages() {
        let extracted = ExtractedDocument {
            pages: vec![
                PageText { number: 1, text: "   ".into() },
                PageText { number: 2, text: String::new() },
            ],
        };
        assert!(!extracted.has_text());
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let extractor = PdfExtractor::new();
        assert!(matches!(
            extractor.extract(b"definitely not a pdf"),
            Err(Error::Pdf(_))
        ));
    }
}
