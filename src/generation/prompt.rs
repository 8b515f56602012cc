//! Prompt templates for page-cited generation

use crate::types::ContextBundle;

/// Prompt builder for document-grounded queries
///
/// Pure formatting: chunk content is never truncated, reordered, or
/// deduplicated here.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render a context bundle as labeled chunks
    ///
    /// Each chunk is labeled with its page and a 1-based index over the
    /// whole bundle (the index restarts per call, not per page).
    pub fn build_context(bundle: &ContextBundle) -> String {
        bundle
            .chunks()
            .iter()
            .enumerate()
            .map(|(i, chunk)| format!("Page {}, Chunk {}:\n{}", chunk.page, i + 1, chunk.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the full Q&A prompt: instructions, context, then the query
    ///
    /// The instructions ask the model to cite contributing pages in the
    /// fixed `(Page i)` format the citation extractor understands.
    pub fn build_chat_prompt(bundle: &ContextBundle, query: &str) -> String {
        let context = Self::build_context(bundle);

        format!(
            r#"You are a helpful assistant with access to a document split into several pages and chunks.
When answering the user's question, also return the page numbers that contributed to the answer.
Wherever you reference a certain page, include the page number in the format (Page i) where i is the page number.

Document Context:
{context}

Question: {query}
Answer (make sure to include (Page X) when you reference info):"#
        )
    }

    /// Build a prompt requesting a structured JSON summary
    pub fn build_summary_prompt(document_text: &str) -> String {
        format!(
            "Analyze the following document text and generate a structured JSON output with:\n\
             - 'document_overview' (a large paragraph summarizing the document)\n\
             - 'key_points' (a list of essential takeaways from the document)\n\
             - 'main_topics' (a list of core topics covered in the document, maximum 4 words per topic)\n\n\
             Document Text:\n{document_text}"
        )
    }

    /// Build a prompt requesting multiple-choice quiz questions over text
    pub fn build_quiz_prompt(text: &str) -> String {
        format!(
            r#"You are a helpful AI assistant that creates multiple-choice questions (MCQs) for exam preparation.

Generate 5 to 7 MCQs based strictly on the following academic text.
The questions should cover main topics discussed in the text.
Each question must include:
- a "question" string,
- an "options" array of 4 strings,
- a correct "answer" string (must match one of the options exactly).

Return the response as a valid JSON list of dictionaries.

TEXT:
"""
{text}
"""
"#
        )
    }
}
