//! Token normalization pipeline
//!
//! Chains normalizers and runs every raw token through them in order. The
//! pipeline itself guarantees that nothing empty or whitespace-only leaves
//! it, whichever steps are configured.

use crate::config::NormalizationConfig;
use crate::normalizers::{Lowercase, Normalizer, PunctuationFilter, Trim, UnicodeNfkc};

/// An ordered chain of token normalizers
#[derive(Default, Clone)]
pub struct TokenPipeline {
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl TokenPipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// Lowercase, trim, then drop punctuation-only tokens
    pub fn standard() -> Self {
        Self::from_config(&NormalizationConfig::default())
    }

    /// Build the pipeline described by `config`
    pub fn from_config(config: &NormalizationConfig) -> Self {
        let mut pipeline = Self::new();
        if config.unicode_nfkc {
            pipeline = pipeline.add_normalizer(Box::new(UnicodeNfkc));
        }
        if config.lowercase {
            pipeline = pipeline.add_normalizer(Box::new(Lowercase));
        }
        if config.trim {
            pipeline = pipeline.add_normalizer(Box::new(Trim));
        }
        if config.drop_punctuation {
            pipeline = pipeline.add_normalizer(Box::new(PunctuationFilter::new()));
        }
        pipeline
    }

    /// Add a normalizer to the pipeline
    pub fn add_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizers.push(normalizer);
        self
    }

    /// Add multiple normalizers at once
    pub fn add_normalizers(mut self, normalizers: Vec<Box<dyn Normalizer>>) -> Self {
        self.normalizers.extend(normalizers);
        self
    }

    /// Run one raw token through every step
    pub fn normalize_token(&self, raw: &str) -> Option<String> {
        let mut current = raw.to_string();
        for normalizer in &self.normalizers {
            current = normalizer.normalize(&current)?;
        }

        if current.trim().is_empty() {
            None
        } else {
            Some(current)
        }
    }

    /// Normalize a raw token list, keeping order and duplicates
    pub fn normalize<I, S>(&self, raw: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .filter_map(|token| self.normalize_token(token.as_ref()))
            .collect()
    }

    /// Get the number of normalizers in the pipeline
    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Get the names of all normalizers in the pipeline
    pub fn normalizer_names(&self) -> Vec<String> {
        self.normalizers
            .iter()
            .map(|n| n.name().to_string())
            .collect()
    }
}

impl std::fmt::Debug for TokenPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.normalizer_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_pipeline() {
        let pipeline = TokenPipeline::standard();
        assert_eq!(
            pipeline.normalizer_names(),
            vec!["lowercase", "trim", "punctuation_filter"]
        );

        let tokens = pipeline.normalize(["Hello", " ", "，", "World ", "", "42", "World"]);
        assert_eq!(tokens, vec!["hello", "world", "42", "world"]);
    }

    #[test]
    fn test_empty_pipeline_still_drops_blank() {
        let pipeline = TokenPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.normalize(["A", "  ", "", "!"]), vec!["A", "!"]);
    }

    #[test]
    fn test_nfkc_runs_first() {
        let config = NormalizationConfig {
            unicode_nfkc: true,
            ..NormalizationConfig::default()
        };
        let pipeline = TokenPipeline::from_config(&config);
        assert_eq!(pipeline.len(), 4);
        assert_eq!(pipeline.normalize(["ＨＥＬＬＯ"]), vec!["hello"]);
    }
}
