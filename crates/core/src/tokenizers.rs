//! Text tokenizers
//!
//! Provides the `Tokenizer` trait and its two implementations:
//!
//! - [`MixedTokenizer`] produces the canonical token sequence for mixed
//!   Chinese/English/numeric text: runs from the segmenter, Chinese runs
//!   broken into words, Latin and number runs taken whole, punctuation and
//!   whitespace discarded, everything normalized.
//! - [`CharacterTokenizer`] splits raw text into Unicode scalar values with
//!   no normalization at all; it backs the character-level diff.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::breaker::ChineseWordBreaker;
use crate::mapping::CharSpan;
use crate::pipeline::TokenPipeline;
use crate::segment::{classify_char, segment, RunKind};

/// A single token with the place it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The normalized token text
    pub text: String,

    /// Category of the run the token was cut from
    pub kind: RunKind,

    /// Byte span of the raw piece in the original text
    pub span: CharSpan,

    /// Token index in the sequence
    pub index: usize,
}

impl Token {
    pub fn new(text: String, kind: RunKind, span: CharSpan, index: usize) -> Self {
        Self {
            text,
            kind,
            span,
            index,
        }
    }
}

/// Trait for tokenizers that split text into tokens
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`, preserving order and duplicates
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Get the name of this tokenizer
    fn name(&self) -> &str;

    /// Get metadata about this tokenizer
    fn metadata(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Clone this tokenizer into a Box
    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Token texts of `tokens`, in order
pub fn token_texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|t| t.text.clone()).collect()
}

// ============================================================================
// Built-in Tokenizers
// ============================================================================

/// Character-level tokenizer (one token per Unicode scalar value, unnormalized)
#[derive(Clone)]
pub struct CharacterTokenizer;

impl Tokenizer for CharacterTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.char_indices()
            .enumerate()
            .map(|(index, (pos, ch))| {
                Token::new(
                    ch.to_string(),
                    classify_char(ch),
                    CharSpan::new(pos, pos + ch.len_utf8()),
                    index,
                )
            })
            .collect()
    }

    fn name(&self) -> &str {
        "character"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

/// Mixed Chinese/English/numeric word tokenizer
#[derive(Debug, Clone)]
pub struct MixedTokenizer {
    breaker: Arc<ChineseWordBreaker>,
    pipeline: TokenPipeline,
    fold_compat: bool,
}

impl MixedTokenizer {
    pub fn new(breaker: Arc<ChineseWordBreaker>) -> Self {
        Self {
            breaker,
            pipeline: TokenPipeline::standard(),
            fold_compat: false,
        }
    }

    /// NFKC-fold the whole text before segmenting, so full-width letters
    /// and digits form Latin and number runs. Token spans then index into
    /// the folded text.
    pub fn with_compat_folding(mut self, enable: bool) -> Self {
        self.fold_compat = enable;
        self
    }

    pub fn with_pipeline(mut self, pipeline: TokenPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn breaker(&self) -> &Arc<ChineseWordBreaker> {
        &self.breaker
    }

    pub fn pipeline(&self) -> &TokenPipeline {
        &self.pipeline
    }

    fn push(&self, tokens: &mut Vec<Token>, raw: &str, kind: RunKind, span: CharSpan) {
        if let Some(text) = self.pipeline.normalize_token(raw) {
            let index = tokens.len();
            tokens.push(Token::new(text, kind, span, index));
        }
    }
}

impl Tokenizer for MixedTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        if text.trim().is_empty() {
            return tokens;
        }

        let text: Cow<'_, str> = if self.fold_compat {
            Cow::Owned(text.nfkc().collect())
        } else {
            Cow::Borrowed(text)
        };

        for run in segment(&text) {
            match run.kind {
                RunKind::Chinese => {
                    let mut offset = run.span.start;
                    for word in self.breaker.break_words(run.text) {
                        let end = (offset + word.len()).min(run.span.end);
                        self.push(&mut tokens, &word, run.kind, CharSpan::new(offset, end));
                        offset = end;
                    }
                }
                RunKind::Latin => {
                    // runs never contain whitespace, split anyway
                    let mut cursor = 0;
                    for word in run.text.split_whitespace() {
                        let start = run.text[cursor..].find(word).map_or(cursor, |i| cursor + i);
                        cursor = start + word.len();
                        let span = CharSpan::new(run.span.start + start, run.span.start + cursor);
                        self.push(&mut tokens, word, run.kind, span);
                    }
                }
                RunKind::Number => self.push(&mut tokens, run.text, run.kind, run.span),
                RunKind::Punctuation | RunKind::Whitespace => {}
            }
        }

        tracing::debug!(tokens = tokens.len(), bytes = text.len(), "tokenized text");
        tokens
    }

    fn name(&self) -> &str {
        "mixed"
    }

    fn metadata(&self) -> Vec<(String, String)> {
        vec![
            ("breaker".to_string(), self.breaker.backend_name().to_string()),
            ("breaker_ready".to_string(), self.breaker.is_ready().to_string()),
            ("normalizers".to_string(), self.pipeline.normalizer_names().join(",")),
            ("compat_folding".to_string(), self.fold_compat.to_string()),
        ]
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaker::{CharSplitter, DictionarySegmenter};
    use crate::error::SegmentError;

    struct WholeRun;

    impl DictionarySegmenter for WholeRun {
        fn cut(&self, run: &str) -> Result<Vec<String>, SegmentError> {
            Ok(vec![run.to_string()])
        }

        fn name(&self) -> &str {
            "whole"
        }
    }

    fn fallback_tokenizer() -> MixedTokenizer {
        MixedTokenizer::new(Arc::new(ChineseWordBreaker::char_split()))
    }

    fn texts(tokenizer: &dyn Tokenizer, text: &str) -> Vec<String> {
        token_texts(&tokenizer.tokenize(text))
    }

    #[test]
    fn test_character_tokenizer() {
        let tokens = CharacterTokenizer.tokenize("a 世!");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[1].kind, RunKind::Whitespace);
        assert_eq!(tokens[2].span, CharSpan::new(2, 5));
        assert_eq!(tokens[3].text, "!");
    }

    #[test]
    fn test_mixed_fallback() {
        let tokenizer = fallback_tokenizer();
        assert_eq!(
            texts(&tokenizer, "Hello 世界 123!"),
            vec!["hello", "世", "界", "123"]
        );
    }

    #[test]
    fn test_mixed_with_dictionary_backend() {
        let tokenizer = MixedTokenizer::new(Arc::new(ChineseWordBreaker::ready(Arc::new(WholeRun))));
        assert_eq!(
            texts(&tokenizer, "Hello 世界 123!"),
            vec!["hello", "世界", "123"]
        );
    }

    #[test]
    fn test_blank_and_punctuation_only_input() {
        let tokenizer = fallback_tokenizer();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  \n\t").is_empty());
        assert!(tokenizer.tokenize("，。！...?").is_empty());
    }

    #[test]
    fn test_numbers_and_contractions_kept_whole() {
        let tokenizer = fallback_tokenizer();
        assert_eq!(
            texts(&tokenizer, "Don't pay 3.50 twice"),
            vec!["don't", "pay", "3.50", "twice"]
        );
    }

    #[test]
    fn test_token_spans_point_into_original() {
        let text = "价格 is 9.9元";
        let tokenizer = MixedTokenizer::new(Arc::new(ChineseWordBreaker::ready(Arc::new(CharSplitter))));
        let tokens = tokenizer.tokenize(text);

        let raw: Vec<&str> = tokens.iter().filter_map(|t| t.span.slice(text)).collect();
        assert_eq!(raw, vec!["价", "格", "is", "9.9", "元"]);
        assert!(tokens.iter().enumerate().all(|(i, t)| t.index == i));
    }

    #[test]
    fn test_compat_folding_before_segmentation() {
        let plain = fallback_tokenizer();
        assert_eq!(texts(&plain, "ＲＵＳＴ１２３ 语言"), vec!["语", "言"]);

        let folding = fallback_tokenizer().with_compat_folding(true);
        assert_eq!(texts(&folding, "ＲＵＳＴ１２３ 语言"), vec!["rust", "123", "语", "言"]);
    }

    #[test]
    fn test_metadata_reports_breaker() {
        let tokenizer = fallback_tokenizer();
        let metadata = tokenizer.metadata();
        assert!(metadata.contains(&("breaker_ready".to_string(), "false".to_string())));
    }
}
