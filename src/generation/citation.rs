//! Page citation extraction from LLM responses

use regex::Regex;
use std::collections::BTreeSet;

/// Extract cited page numbers from a free-text response
///
/// Matches `Page N` with each parenthesis independently optional, so
/// `(Page 3)`, `Page 3`, and unbalanced forms like `(Page 3` all count.
///
/// Returns distinct pages in ascending order. No match is an empty
/// result, never an error.
pub fn extract_pages(response: &str) -> Vec<u32> {
    let pattern = Regex::new(r"\(?Page (\d+)\)?").expect("Invalid regex");

    let pages: BTreeSet<u32> = pattern
        .captures_iter(response)
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    pages.into_iter().collect()
}
