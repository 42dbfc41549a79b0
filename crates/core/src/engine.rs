//! Comparison engine that ties tokenization to similarity, diff and highlighting

use std::sync::Arc;

use crate::breaker::ChineseWordBreaker;
use crate::config::CompareConfig;
use crate::diff::{collapse, DiffPart, DiffStatistics, DiffUnit};
use crate::error::{ConfigError, InitError};
use crate::highlight::{highlight_tokens, HighlightResult};
use crate::pipeline::TokenPipeline;
use crate::report::{ComparisonReport, SegmentResult};
use crate::similarity;
use crate::tokenizers::{token_texts, CharacterTokenizer, MixedTokenizer, Token, Tokenizer};

/// The main comparison engine
///
/// Every operation is synchronous and total. Chinese runs are split into
/// single characters until [`CompareEngine::initialize`] has completed
/// successfully on the engine's word breaker.
#[derive(Debug, Clone)]
pub struct CompareEngine {
    config: CompareConfig,
    tokenizer: MixedTokenizer,
}

impl CompareEngine {
    /// Create an engine sharing an existing breaker handle
    pub fn new(config: CompareConfig, breaker: Arc<ChineseWordBreaker>) -> Self {
        let tokenizer = MixedTokenizer::new(breaker)
            .with_compat_folding(config.normalization.unicode_nfkc)
            .with_pipeline(TokenPipeline::from_config(&config.normalization));
        Self { config, tokenizer }
    }

    /// Validate `config` and create an engine with a fresh, uninitialized
    /// breaker for the configured backend
    pub fn from_config(config: CompareConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let breaker = Arc::new(ChineseWordBreaker::from_config(&config.breaker));
        Ok(Self::new(config, breaker))
    }

    /// Engine with default settings that only ever splits Chinese into
    /// single characters
    pub fn fallback() -> Self {
        Self::new(
            CompareConfig::char_split(),
            Arc::new(ChineseWordBreaker::char_split()),
        )
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn breaker(&self) -> &Arc<ChineseWordBreaker> {
        self.tokenizer.breaker()
    }

    /// Set up the Chinese word breaker backend. See
    /// [`ChineseWordBreaker::initialize`].
    pub async fn initialize(&self) -> Result<(), InitError> {
        self.breaker().initialize().await
    }

    /// Tokens of `text` with their kinds and spans
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer.tokenize(text)
    }

    /// The canonical token sequence of `text`
    pub fn segment_text(&self, text: &str) -> Vec<String> {
        token_texts(&self.tokenize(text))
    }

    pub fn segment_result(&self, text: &str) -> SegmentResult {
        SegmentResult::new(self.segment_text(text))
    }

    pub fn cosine_similarity(&self, text1: &str, text2: &str) -> f64 {
        similarity::cosine_similarity(&self.segment_text(text1), &self.segment_text(text2))
    }

    pub fn jaccard_similarity(&self, text1: &str, text2: &str) -> f64 {
        similarity::jaccard_similarity(&self.segment_text(text1), &self.segment_text(text2))
    }

    /// Word-level diff over the token sequences
    pub fn diff_tokens(&self, text1: &str, text2: &str) -> Vec<DiffPart> {
        let tokens1 = self.segment_text(text1);
        let tokens2 = self.segment_text(text2);
        self.diff_sequences(&tokens1, &tokens2, DiffUnit::Token)
    }

    /// Character-level diff over the raw texts, punctuation and whitespace
    /// included
    pub fn diff_chars(&self, text1: &str, text2: &str) -> Vec<DiffPart> {
        let chars1 = token_texts(&CharacterTokenizer.tokenize(text1));
        let chars2 = token_texts(&CharacterTokenizer.tokenize(text2));
        self.diff_sequences(&chars1, &chars2, DiffUnit::Char)
    }

    pub fn highlight(&self, text1: &str, text2: &str) -> HighlightResult {
        highlight_tokens(&self.segment_text(text1), &self.segment_text(text2))
    }

    /// Run every comparison, tokenizing each text once
    pub fn compare(&self, text1: &str, text2: &str) -> ComparisonReport {
        let tokens1 = self.segment_text(text1);
        let tokens2 = self.segment_text(text2);

        let token_diff = self.diff_sequences(&tokens1, &tokens2, DiffUnit::Token);
        let char_diff = self.diff_chars(text1, text2);

        let report = ComparisonReport {
            algorithm: self.config.algorithm,
            cosine_similarity: similarity::cosine_similarity(&tokens1, &tokens2),
            jaccard_similarity: similarity::jaccard_similarity(&tokens1, &tokens2),
            token_statistics: DiffStatistics::from_parts(&token_diff),
            char_statistics: DiffStatistics::from_parts(&char_diff),
            highlight: highlight_tokens(&tokens1, &tokens2),
            token_diff,
            char_diff,
        };

        tracing::debug!(
            algorithm = report.algorithm.name(),
            cosine = report.cosine_similarity,
            jaccard = report.jaccard_similarity,
            "compared texts"
        );
        report
    }

    fn diff_sequences(&self, original: &[String], modified: &[String], unit: DiffUnit) -> Vec<DiffPart> {
        let ops = self.config.algorithm.diff(original, modified);
        collapse(&ops, original, modified, unit)
    }
}

impl Default for CompareEngine {
    fn default() -> Self {
        Self::fallback()
    }
}
