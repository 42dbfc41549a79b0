//! Shared-token highlighting
//!
//! Marks every token of each text by whether it also occurs anywhere in the
//! other text. Counts are taken from the first text's point of view and are
//! deliberately asymmetric: `"a a b"` against `"a"` shares two occurrences,
//! `"a"` against `"a a b"` shares one.

use std::collections::HashSet;

use serde::Serialize;

/// One token of a text and whether the other text contains it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightedToken {
    pub text: String,
    pub is_shared: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightResult {
    /// Every token of the first text, in order, duplicates kept
    pub text1_parts: Vec<HighlightedToken>,
    /// Every token of the second text, in order, duplicates kept
    pub text2_parts: Vec<HighlightedToken>,
    /// Distinct shared tokens in order of first occurrence in the first text
    pub same_words: Vec<String>,
    /// Occurrences in the first text of tokens the second text contains
    pub same_words_count: usize,
    pub text1_word_count: usize,
    pub text2_word_count: usize,
}

impl HighlightResult {
    /// Occurrences in the second text of tokens the first text contains
    pub fn text2_same_words_count(&self) -> usize {
        self.text2_parts.iter().filter(|p| p.is_shared).count()
    }
}

/// Highlight shared tokens between two token sequences
pub fn highlight_tokens<S: AsRef<str>>(tokens1: &[S], tokens2: &[S]) -> HighlightResult {
    let set1: HashSet<&str> = tokens1.iter().map(|t| t.as_ref()).collect();
    let set2: HashSet<&str> = tokens2.iter().map(|t| t.as_ref()).collect();

    let text1_parts = mark(tokens1, &set2);
    let text2_parts = mark(tokens2, &set1);

    let same_words = {
        let mut seen = HashSet::new();
        text1_parts
            .iter()
            .filter(|p| p.is_shared && seen.insert(p.text.as_str()))
            .map(|p| p.text.clone())
            .collect()
    };
    let same_words_count = text1_parts.iter().filter(|p| p.is_shared).count();

    HighlightResult {
        text1_word_count: text1_parts.len(),
        text2_word_count: text2_parts.len(),
        text1_parts,
        text2_parts,
        same_words,
        same_words_count,
    }
}

fn mark<S: AsRef<str>>(tokens: &[S], other: &HashSet<&str>) -> Vec<HighlightedToken> {
    tokens
        .iter()
        .map(|t| HighlightedToken {
            text: t.as_ref().to_string(),
            is_shared: other.contains(t.as_ref()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_shared_tokens() {
        let result = highlight_tokens(&["我", "爱", "rust"], &["rust", "爱", "好"]);

        let marks: Vec<bool> = result.text1_parts.iter().map(|p| p.is_shared).collect();
        assert_eq!(marks, vec![false, true, true]);
        let marks: Vec<bool> = result.text2_parts.iter().map(|p| p.is_shared).collect();
        assert_eq!(marks, vec![true, true, false]);
        assert_eq!(result.same_words, vec!["爱", "rust"]);
    }

    #[test]
    fn test_count_is_asymmetric() {
        let forward = highlight_tokens(&["a", "a", "b"], &["a"]);
        assert_eq!(forward.same_words, vec!["a"]);
        assert_eq!(forward.same_words_count, 2);
        assert_eq!(forward.text2_same_words_count(), 1);
        assert_eq!(forward.text1_word_count, 3);
        assert_eq!(forward.text2_word_count, 1);

        let backward = highlight_tokens(&["a"], &["a", "a", "b"]);
        assert_eq!(backward.same_words_count, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        let result = highlight_tokens(&empty, &["x"]);
        assert!(result.same_words.is_empty());
        assert_eq!(result.same_words_count, 0);
        assert_eq!(result.text2_parts.len(), 1);
        assert!(!result.text2_parts[0].is_shared);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(highlight_tokens(&["a"], &["a"])).unwrap();
        assert_eq!(json["sameWordsCount"], 1);
        assert_eq!(json["text1Parts"][0]["isShared"], true);
    }
}
