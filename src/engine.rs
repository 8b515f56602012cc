//! Pipeline orchestration: question answering, summaries, and quizzes
//!
//! Each operation is a straight line: build (or fetch) the context,
//! format a prompt, call the provider, parse the response. Nothing runs
//! concurrently and nothing retries; provider failures come back as
//! `Error::Llm`.

use std::sync::Arc;

use crate::cache::ContextCache;
use crate::config::PageRagConfig;
use crate::error::{Error, Result};
use crate::generation::{decode_fenced_json, decode_json_array, extract_pages, PromptBuilder};
use crate::ingestion::WordChunker;
use crate::providers::LlmProvider;
use crate::types::{Answer, ContextBundle, Document, DocumentSummary, QuizQuestion};

/// Document chat engine
pub struct ChatEngine {
    llm: Arc<dyn LlmProvider>,
    chunker: WordChunker,
    cache: Arc<ContextCache>,
}

impl ChatEngine {
    /// Create an engine from configuration and a provider
    ///
    /// Fails fast if the chunking configuration could not terminate.
    pub fn new(config: &PageRagConfig, llm: Arc<dyn LlmProvider>) -> Result<Self> {
        Ok(Self {
            llm,
            chunker: WordChunker::from_config(&config.chunking)?,
            cache: Arc::new(ContextCache::from_config(&config.cache)),
        })
    }

    /// Create an engine with an explicit cache shared with the caller
    pub fn with_cache(
        config: &PageRagConfig,
        llm: Arc<dyn LlmProvider>,
        cache: Arc<ContextCache>,
    ) -> Result<Self> {
        Ok(Self {
            llm,
            chunker: WordChunker::from_config(&config.chunking)?,
            cache,
        })
    }

    /// The context cache, for explicit invalidation by the caller
    pub fn cache(&self) -> &Arc<ContextCache> {
        &self.cache
    }

    /// Build the context bundle for a document, consulting the cache
    ///
    /// A document whose sections hold no text at all is a no-content
    /// error: there is nothing to ask questions about.
    pub fn context_for(&self, doc: &Document) -> Result<ContextBundle> {
        let id = doc.identity();

        if let Some(bundle) = self.cache.get(&id) {
            return Ok(bundle);
        }

        let bundle = self.chunker.chunk_document(doc);
        if bundle.is_empty() {
            return Err(Error::NoContent(
                "no valid text found in the document".to_string(),
            ));
        }

        self.cache.put(&id, bundle.clone());
        Ok(bundle)
    }

    /// Answer a question about a document, with page citations
    pub async fn ask(&self, doc: &Document, question: &str) -> Result<Answer> {
        let bundle = self.context_for(doc)?;
        let prompt = PromptBuilder::build_chat_prompt(&bundle, question);

        tracing::info!(chunks = bundle.len(), model = self.llm.model(), "asking");
        let text = self.llm.generate(&prompt).await?;
        let pages = extract_pages(&text);
        tracing::debug!(?pages, "cited pages");

        Ok(Answer { text, pages })
    }

    /// Produce a structured summary of the whole document
    pub async fn summarize(&self, doc: &Document) -> Result<DocumentSummary> {
        let document_text = doc.full_text();
        if document_text.is_empty() {
            return Err(Error::NoContent(
                "no valid text found in the document".to_string(),
            ));
        }

        let prompt = PromptBuilder::build_summary_prompt(&document_text);
        let response = self.llm.generate(&prompt).await?;
        decode_fenced_json(&response)
    }

    /// Generate quiz questions over a page range
    ///
    /// Covers pages `start_page..start_page + page_span`; an empty range
    /// (no sections with those pages) is an error.
    pub async fn quiz(
        &self,
        doc: &Document,
        start_page: u32,
        page_span: u32,
    ) -> Result<Vec<QuizQuestion>> {
        let end_page = start_page + page_span.saturating_sub(1);

        let combined: Vec<&str> = doc
            .sections
            .iter()
            .enumerate()
            .filter(|(i, s)| {
                let page = doc.page_of(*i);
                (start_page..=end_page).contains(&page) && !s.text.trim().is_empty()
            })
            .map(|(_, s)| s.text.as_str())
            .collect();

        if combined.is_empty() {
            return Err(Error::NoContent(format!(
                "no pages found in the range {}-{}",
                start_page, end_page
            )));
        }

        let prompt = PromptBuilder::build_quiz_prompt(&combined.join("\n\n"));
        let response = self.llm.generate(&prompt).await?;
        decode_json_array(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Stub provider returning a canned response and recording prompts
    struct StubLlm {
        response: String,
        prompts: Mutex<Vec<String>>,
    }

    impl StubLlm {
        fn new(response: &str) -> Self {
            Self {
                response: response.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for StubLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            Ok(self.response.clone())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn doc() -> Document {
        Document::from_json(
            "doc",
            r#"{"sections": [
                {"page": 1, "text": "The sky is blue because of Rayleigh scattering."},
                {"page": 2, "text": "Water is made of hydrogen and oxygen."}
            ]}"#,
        )
        .unwrap()
    }

    fn engine(response: &str) -> (ChatEngine, Arc<StubLlm>) {
        let llm = Arc::new(StubLlm::new(response));
        let engine = ChatEngine::new(&PageRagConfig::default(), llm.clone()).unwrap();
        (engine, llm)
    }

    #[tokio::test]
    async fn ask_returns_answer_with_sorted_pages() {
        let (engine, llm) = engine("Blue (Page 2) and also Page 1 says so.");
        let answer = engine.ask(&doc(), "why is the sky blue?").await.unwrap();

        assert_eq!(answer.pages, vec![1, 2]);
        assert!(answer.text.contains("Blue"));

        let prompts = llm.prompts.lock();
        assert!(prompts[0].contains("why is the sky blue?"));
        assert!(prompts[0].contains("Rayleigh scattering"));
    }

    #[tokio::test]
    async fn ask_without_citations_yields_empty_pages() {
        let (engine, _) = engine("I cannot tell from the document.");
        let answer = engine.ask(&doc(), "anything?").await.unwrap();
        assert!(answer.pages.is_empty());
    }

    #[tokio::test]
    async fn empty_document_is_a_no_content_error() {
        let (engine, _) = engine("irrelevant");
        let empty = Document::from_json("e", r#"{"sections": [{"text": "  "}]}"#).unwrap();

        assert!(matches!(
            engine.ask(&empty, "?").await,
            Err(Error::NoContent(_))
        ));
        assert!(matches!(
            engine.summarize(&empty).await,
            Err(Error::NoContent(_))
        ));
    }

    #[tokio::test]
    async fn context_is_cached_by_document_identity() {
        let (engine, _) = engine("ok");
        let d = doc();

        engine.context_for(&d).unwrap();
        engine.context_for(&d).unwrap();
        assert_eq!(engine.cache().stats().total_hits, 1);

        engine.cache().invalidate(&d.identity());
        engine.context_for(&d).unwrap();
        assert_eq!(engine.cache().stats().entries, 1);
    }

    #[tokio::test]
    async fn summarize_decodes_fenced_json() {
        let (engine, _) = engine(
            "```json\n{\"document_overview\": \"About science.\", \"key_points\": [\"sky\"], \"main_topics\": [\"physics\"]}\n```",
        );

        let summary = engine.summarize(&doc()).await.unwrap();
        assert_eq!(summary.main_topics, vec!["physics"]);
    }

    #[tokio::test]
    async fn summarize_rejects_malformed_output() {
        let (engine, _) = engine("I'd rather chat about the weather.");
        assert!(matches!(
            engine.summarize(&doc()).await,
            Err(Error::LlmOutput(_))
        ));
    }

    #[tokio::test]
    async fn quiz_filters_pages_and_decodes_array() {
        let (engine, llm) = engine(
            r#"Here you go: [{"question": "Q?", "options": ["a","b","c","d"], "answer": "a"}]"#,
        );

        let questions = engine.quiz(&doc(), 2, 1).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert!(questions[0].is_consistent());

        // only page 2 text goes into the prompt
        let prompts = llm.prompts.lock();
        assert!(prompts[0].contains("hydrogen"));
        assert!(!prompts[0].contains("Rayleigh"));
    }

    #[tokio::test]
    async fn quiz_on_missing_range_is_an_error() {
        let (engine, _) = engine("irrelevant");
        assert!(matches!(
            engine.quiz(&doc(), 10, 5).await,
            Err(Error::NoContent(_))
        ));
    }
}
