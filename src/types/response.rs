//! Response types for LLM-backed operations

use serde::{Deserialize, Serialize};

/// Answer to a question, with the pages that contributed to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Free-text answer from the model
    pub text: String,
    /// Distinct cited pages, ascending
    pub pages: Vec<u32>,
}

/// Structured document summary
///
/// The summary prompt asks the model for exactly this JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// A large paragraph summarizing the document
    pub document_overview: String,
    /// Essential takeaways
    pub key_points: Vec<String>,
    /// Core topics, at most 4 words each
    pub main_topics: Vec<String>,
}

/// A multiple-choice quiz question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text
    pub question: String,
    /// Four answer options
    pub options: Vec<String>,
    /// Correct answer; matches one of the options exactly
    pub answer: String,
}

impl QuizQuestion {
    /// Whether the stated answer is one of the options
    pub fn is_consistent(&self) -> bool {
        self.options.iter().any(|o| o == &self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_question_consistency() {
        let q = QuizQuestion {
            question: "What color is the sky?".to_string(),
            options: vec!["Blue".into(), "Green".into(), "Red".into(), "Black".into()],
            answer: "Blue".to_string(),
        };
        assert!(q.is_consistent());

        let bad = QuizQuestion {
            answer: "Purple".to_string(),
            ..q
        };
        assert!(!bad.is_consistent());
    }
}
