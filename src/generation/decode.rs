//! Recovering structured JSON from LLM free text
//!
//! Models wrap JSON in markdown fences or prose. These helpers pull the
//! JSON back out and deserialize it, reporting a malformed-output error
//! distinct from a failed LLM call.

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Extract and deserialize a ```json fenced block
pub fn decode_fenced_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let pattern = Regex::new(r"(?s)```json\n(.*?)\n```").expect("Invalid regex");

    let content = match pattern.captures(text).and_then(|cap| cap.get(1)) {
        Some(m) => m.as_str(),
        // some models skip the fence entirely; try the raw text
        None => text.trim(),
    };

    serde_json::from_str(content)
        .map_err(|e| Error::llm_output(format!("expected JSON object: {}", e)))
}

/// Extract and deserialize the outermost bracketed JSON array
pub fn decode_json_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let start = text.find('[');
    let end = text.rfind(']');

    let (Some(start), Some(end)) = (start, end) else {
        return Err(Error::llm_output("no JSON array found in response"));
    };
    if end < start {
        return Err(Error::llm_output("no JSON array found in response"));
    }

    serde_json::from_str(&text[start..=end])
        .map_err(|e| Error::llm_output(format!("expected JSON array: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        name: String,
    }

    #[test]
    fn decodes_fenced_json() {
        let text = "Here you go:\n```json\n{\"name\": \"doc\"}\n```\nanything else";
        let payload: Payload = decode_fenced_json(text).unwrap();
        assert_eq!(payload.name, "doc");
    }

    #[test]
    fn decodes_multiline_fenced_json() {
        let text = "```json\n{\n  \"name\": \"doc\"\n}\n```";
        let payload: Payload = decode_fenced_json(text).unwrap();
        assert_eq!(payload.name, "doc");
    }

    #[test]
    fn falls_back_to_bare_json() {
        let payload: Payload = decode_fenced_json("{\"name\": \"bare\"}").unwrap();
        assert_eq!(payload.name, "bare");
    }

    #[test]
    fn garbage_is_a_malformed_output_error() {
        let err = decode_fenced_json::<Payload>("sorry, I cannot do that").unwrap_err();
        assert!(matches!(err, Error::LlmOutput(_)));
    }

    #[test]
    fn decodes_array_embedded_in_prose() {
        let text = "Sure! Here are the items: [{\"name\": \"a\"}, {\"name\": \"b\"}] hope that helps";
        let items: Vec<Payload> = decode_json_array(text).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "b");
    }

    #[test]
    fn missing_array_is_a_malformed_output_error() {
        assert!(matches!(
            decode_json_array::<Payload>("no list here"),
            Err(Error::LlmOutput(_))
        ));
        assert!(matches!(
            decode_json_array::<Payload>("] backwards ["),
            Err(Error::LlmOutput(_))
        ));
    }
}
