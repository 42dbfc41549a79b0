//! Aggregate comparison results

use std::fmt;

use serde::Serialize;

use crate::algorithm::DiffAlgorithmKind;
use crate::diff::{DiffPart, DiffStatistics};
use crate::highlight::HighlightResult;

/// Tokenization of one text, for inspecting what the comparisons see
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SegmentResult {
    pub words: Vec<String>,
    pub count: usize,
}

impl SegmentResult {
    pub fn new(words: Vec<String>) -> Self {
        let count = words.len();
        Self { words, count }
    }
}

/// Every comparison of two texts in one value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Algorithm both diffs were computed with
    pub algorithm: DiffAlgorithmKind,

    pub cosine_similarity: f64,
    pub jaccard_similarity: f64,

    /// Word-level diff over normalized tokens
    pub token_diff: Vec<DiffPart>,

    /// Character-level diff over the raw texts
    pub char_diff: Vec<DiffPart>,

    pub highlight: HighlightResult,

    /// Counted in tokens
    pub token_statistics: DiffStatistics,

    /// Counted in characters
    pub char_statistics: DiffStatistics,
}

impl ComparisonReport {
    /// Whether the texts tokenize identically
    pub fn is_token_identical(&self) -> bool {
        self.token_statistics.is_unchanged()
    }

    /// Whether the raw texts are identical
    pub fn is_identical(&self) -> bool {
        self.char_statistics.is_unchanged()
    }

    /// One-line summary of the comparison
    pub fn summary(&self) -> String {
        format!(
            "Comparison Summary: cosine {:.3}, jaccard {:.3}, {} shared words. \
             Tokens: {}",
            self.cosine_similarity,
            self.jaccard_similarity,
            self.highlight.same_words.len(),
            self.token_statistics
        )
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        writeln!(f, "Characters: {}", self.char_statistics)?;
        for part in &self.token_diff {
            writeln!(f, "  {}", part.description())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ComparisonReport {
        let token_diff = vec![
            DiffPart::same("a", 1),
            DiffPart::removed("b", 1),
            DiffPart::same("c", 1),
        ];
        let char_diff = vec![DiffPart::same("a ", 2), DiffPart::removed("b ", 2), DiffPart::same("c", 1)];
        ComparisonReport {
            algorithm: DiffAlgorithmKind::Myers,
            cosine_similarity: 0.816,
            jaccard_similarity: 2.0 / 3.0,
            token_statistics: DiffStatistics::from_parts(&token_diff),
            char_statistics: DiffStatistics::from_parts(&char_diff),
            token_diff,
            char_diff,
            highlight: HighlightResult::default(),
        }
    }

    #[test]
    fn test_segment_result_counts_words() {
        let result = SegmentResult::new(vec!["你".to_string(), "好".to_string()]);
        assert_eq!(result.count, 2);
    }

    #[test]
    fn test_summary_and_display() {
        let report = report();
        assert!(!report.is_identical());
        assert!(report.summary().contains("jaccard 0.667"));
        assert!(report.summary().contains("2 same, 0 added, 1 removed"));

        let rendered = report.to_string();
        assert!(rendered.contains("Removed: \"b\""));
        assert!(rendered.starts_with("Comparison Summary"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["algorithm"], "myers");
        assert_eq!(json["tokenDiff"][1]["type"], "removed");
        assert_eq!(json["tokenStatistics"]["removed"], 1);
        assert!(json["highlight"]["sameWords"].is_array());
    }
}
