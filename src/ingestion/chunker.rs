//! Word-window chunking with page tracking

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::{Chunk, ContextBundle, Document};

/// Splits page text into overlapping word-windows
///
/// Construction validates the configuration: an overlap that is not
/// strictly smaller than the window size would stop the window from
/// advancing, so it is rejected up front instead of looping.
#[derive(Debug, Clone)]
pub struct WordChunker {
    max_words: usize,
    overlap: usize,
}

impl WordChunker {
    /// Create a chunker, failing fast on a non-advancing configuration
    pub fn new(max_words: usize, overlap: usize) -> Result<Self> {
        let config = ChunkingConfig { max_words, overlap };
        config.validate()?;
        Ok(Self { max_words, overlap })
    }

    /// Create a chunker from a validated configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.max_words, config.overlap)
    }

    /// Split text into overlapping word-windows
    ///
    /// Words are whitespace-separated. Empty or whitespace-only text
    /// yields no chunks. Every chunk holds at most `max_words` words and
    /// consecutive chunks share exactly `overlap` words, except the final
    /// chunk which may be shorter.
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut chunks = Vec::new();
        let step = self.max_words - self.overlap;

        let mut start = 0;
        while start < words.len() {
            let end = (start + self.max_words).min(words.len());
            chunks.push(words[start..end].join(" "));
            if end == words.len() {
                // a further window would fall entirely inside this one
                break;
            }
            start += step;
        }

        chunks
    }

    /// Chunk every non-empty section of a document into a context bundle
    ///
    /// Sections are traversed in order, so the bundle is page-ascending
    /// then chunk-ascending. Sections with no text are skipped.
    pub fn chunk_document(&self, doc: &Document) -> ContextBundle {
        let mut bundle = ContextBundle::new();

        for (index, section) in doc.sections.iter().enumerate() {
            if section.text.trim().is_empty() {
                continue;
            }
            let page = doc.page_of(index);
            for text in self.chunk_text(&section.text) {
                bundle.push(Chunk::new(page, text));
            }
        }

        tracing::debug!(chunks = bundle.len(), "built context bundle");
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn rejects_overlap_not_below_max() {
        assert!(matches!(WordChunker::new(10, 10), Err(Error::Config(_))));
        assert!(matches!(WordChunker::new(10, 15), Err(Error::Config(_))));
        assert!(WordChunker::new(10, 9).is_ok());
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = WordChunker::new(10, 2).unwrap();
        assert!(chunker.chunk_text("").is_empty());
        assert!(chunker.chunk_text("   \n\t  ").is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunker = WordChunker::new(10, 2).unwrap();
        let chunks = chunker.chunk_text("one two three");
        assert_eq!(chunks, vec!["one two three".to_string()]);
    }

    #[test]
    fn chunk_count_matches_window_arithmetic() {
        // ceil((W - O) / (M - O)) chunks for W words, overlap O, window M
        let cases = [
            (25usize, 10usize, 4usize),
            (10, 10, 1),
            (11, 10, 2),
            (100, 10, 14),
        ];
        for (w, m, expected) in cases {
            let o = 3;
            let chunker = WordChunker::new(m, o).unwrap();
            let chunks = chunker.chunk_text(&words(w));
            let formula = (w - o).div_ceil(m - o);
            assert_eq!(chunks.len(), formula, "W={} M={}", w, m);
            assert_eq!(chunks.len(), expected, "W={} M={}", w, m);
        }
    }

    #[test]
    fn tiny_inputs_still_chunk() {
        // W at or below the overlap still produces one (short) chunk
        let chunker = WordChunker::new(10, 3).unwrap();
        assert_eq!(chunker.chunk_text("lonely").len(), 1);
        assert_eq!(chunker.chunk_text(&words(3)).len(), 1);
    }

    #[test]
    fn chunks_are_bounded_and_overlap_exactly() {
        let chunker = WordChunker::new(8, 3).unwrap();
        let chunks = chunker.chunk_text(&words(30));

        for chunk in &chunks {
            assert!(chunk.split_whitespace().count() <= 8);
        }

        for pair in chunks.windows(2) {
            let left: Vec<&str> = pair[0].split_whitespace().collect();
            let right: Vec<&str> = pair[1].split_whitespace().collect();
            // the last chunk may be shorter, but the shared boundary is
            // always the overlap
            let shared = &left[left.len() - 3..];
            assert_eq!(shared, &right[..3]);
        }
    }

    #[test]
    fn document_chunks_carry_page_numbers() {
        let doc = Document::from_json(
            "doc",
            r#"{"sections": [
                {"page": 1, "text": "alpha beta gamma"},
                {"page": 2, "text": ""},
                {"page": 3, "text": "delta epsilon"}
            ]}"#,
        )
        .unwrap();

        let chunker = WordChunker::new(2, 1).unwrap();
        let bundle = chunker.chunk_document(&doc);

        let pages: Vec<u32> = bundle.chunks().iter().map(|c| c.page).collect();
        assert!(pages.windows(2).all(|p| p[0] <= p[1]));
        assert!(!pages.contains(&2), "empty section must be skipped");
        assert_eq!(bundle.chunks()[0], Chunk::new(1, "alpha beta"));
    }

    #[test]
    fn all_words_survive_chunking() {
        let chunker = WordChunker::new(5, 2).unwrap();
        let text = words(17);
        let chunks = chunker.chunk_text(&text);

        // stitch chunks back together, dropping each chunk's overlap prefix
        let mut rebuilt: Vec<String> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let skip = if i == 0 { 0 } else { 2 };
            rebuilt.extend(chunk.split_whitespace().skip(skip).map(String::from));
        }
        assert_eq!(rebuilt.join(" "), text);
    }
}
