//! # TextCompare Library
//!
//! Comparison of mixed Chinese/English text. Every comparison runs on one
//! canonical token sequence per text, so similarity scores, diffs and
//! highlighting always agree on what a "word" is.
//!
//! ## Core Concepts
//!
//! - **Segmenter**: Splits raw text losslessly into typed runs
//! - **ChineseWordBreaker**: Breaks Chinese runs into words once its backend
//!   is initialized, into single characters until then
//! - **Pipelines**: Chain normalizers applied to every raw token
//! - **Tokenizers**: Combine the above into the canonical token sequence
//! - **CompareEngine**: Similarity, token/character diffs and highlighting
//!
//! ## Example
//!
//! ```rust
//! use textcompare_core::{CompareConfig, CompareEngine, DiffAlgorithmKind, DiffPart};
//!
//! let engine = CompareEngine::from_config(
//!     CompareConfig::char_split().with_algorithm(DiffAlgorithmKind::Patience),
//! )
//! .unwrap();
//!
//! assert_eq!(engine.segment_text("Hello 世界 123!"), vec!["hello", "世", "界", "123"]);
//! assert_eq!(
//!     engine.diff_tokens("a b c", "a c"),
//!     vec![DiffPart::same("a", 1), DiffPart::removed("b", 1), DiffPart::same("c", 1)]
//! );
//! ```
//!
//! Dictionary segmentation needs a one-time asynchronous setup:
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use textcompare_core::{load_config, CompareEngine};
//!
//! let engine = CompareEngine::from_config(load_config()?)?;
//! engine.initialize().await?;
//! println!("{}", engine.compare("我爱北京天安门", "我爱上海"));
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod breaker;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod mapping;
pub mod normalizers;
pub mod pipeline;
pub mod report;
pub mod segment;
pub mod similarity;
pub mod tokenizers;

use once_cell::sync::Lazy;

// Re-export main types
pub use algorithm::{DiffAlgorithm, DiffAlgorithmKind, EditOp};
pub use breaker::{BreakerState, ChineseWordBreaker, DictionarySegmenter, SegmenterLoader};
pub use config::{load_config, load_config_from_path, BreakerBackend, BreakerConfig, CompareConfig, NormalizationConfig};
pub use diff::{DiffKind, DiffPart, DiffStatistics, DiffUnit};
pub use engine::CompareEngine;
pub use error::{ConfigError, InitError, SegmentError};
pub use highlight::{HighlightResult, HighlightedToken};
pub use pipeline::TokenPipeline;
pub use report::{ComparisonReport, SegmentResult};
pub use segment::{RunKind, TextRun};
pub use tokenizers::{Token, Tokenizer};

/// Engine behind the free functions: default settings, Chinese split into
/// single characters
static FALLBACK_ENGINE: Lazy<CompareEngine> = Lazy::new(CompareEngine::fallback);

/// Canonical token sequence of `text`
///
/// # Example
///
/// ```rust
/// assert_eq!(
///     textcompare_core::segment_text("Don't PANIC，朋友!"),
///     vec!["don't", "panic", "朋", "友"]
/// );
/// ```
pub fn segment_text(text: &str) -> Vec<String> {
    FALLBACK_ENGINE.segment_text(text)
}

/// Tokens of `text` together with their count
pub fn segment_result(text: &str) -> SegmentResult {
    FALLBACK_ENGINE.segment_result(text)
}

/// Cosine similarity of the term-frequency vectors of two texts, in `[0, 1]`
pub fn cosine_similarity(text1: &str, text2: &str) -> f64 {
    FALLBACK_ENGINE.cosine_similarity(text1, text2)
}

/// Jaccard similarity of the token sets of two texts, in `[0, 1]`
pub fn jaccard_similarity(text1: &str, text2: &str) -> f64 {
    FALLBACK_ENGINE.jaccard_similarity(text1, text2)
}

/// Word-level diff between two texts
///
/// # Arguments
///
/// * `text1` - The original text
/// * `text2` - The modified text
///
/// # Returns
///
/// Runs of tokens, each `Same`, `Removed` (only in `text1`) or `Added`
/// (only in `text2`), tokens joined with a single space
pub fn diff_tokens(text1: &str, text2: &str) -> Vec<DiffPart> {
    FALLBACK_ENGINE.diff_tokens(text1, text2)
}

/// Character-level diff between two raw texts
pub fn diff_chars(text1: &str, text2: &str) -> Vec<DiffPart> {
    FALLBACK_ENGINE.diff_chars(text1, text2)
}

/// Mark the tokens each text shares with the other
pub fn highlight(text1: &str, text2: &str) -> HighlightResult {
    FALLBACK_ENGINE.highlight(text1, text2)
}

/// Every comparison of two texts in one report
///
/// # Example
///
/// ```rust
/// let report = textcompare_core::compare("苹果 手机", "苹果 电脑");
/// assert!((report.jaccard_similarity - 2.0 / 6.0).abs() < 1e-9);
/// println!("{}", report.summary());
/// ```
pub fn compare(text1: &str, text2: &str) -> ComparisonReport {
    FALLBACK_ENGINE.compare(text1, text2)
}
