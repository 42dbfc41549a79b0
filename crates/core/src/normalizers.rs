//! Token normalizers
//!
//! Provides the `Normalizer` trait and the built-in steps applied to every
//! raw token before it takes part in a comparison. A normalizer either
//! rewrites a token or drops it by returning `None`.

use unicode_normalization::UnicodeNormalization;

/// Trait for token normalizers
pub trait Normalizer: Send + Sync {
    /// Normalize one raw token
    ///
    /// # Returns
    ///
    /// The rewritten token, or `None` if the token should be discarded
    fn normalize(&self, token: &str) -> Option<String>;

    /// Get the name of this normalizer
    fn name(&self) -> &str;

    /// Get metadata about this normalizer (e.g., configuration)
    fn metadata(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Clone this normalizer into a Box
    fn clone_box(&self) -> Box<dyn Normalizer>;
}

impl Clone for Box<dyn Normalizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// ASCII and full-width Chinese punctuation that never forms a token on its own.
///
/// Quotes are the ASCII `"` and `'` only; curly quotes are not listed and can
/// be added with [`PunctuationFilter::with_extra`].
pub const PUNCTUATION_CHARS: &[char] = &[
    ',', '.', '!', '?', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}', '<', '>', '-', '_',
    '，', '。', '！', '？', '；', '：', '（', '）', '【', '】', '《', '》', '、', '—', '…', '·',
];

/// Whether `token` is non-empty and made only of [`PUNCTUATION_CHARS`]
pub fn is_punctuation_only(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| PUNCTUATION_CHARS.contains(&c))
}

// ============================================================================
// Built-in Normalizers
// ============================================================================

/// Converts the token to lowercase
#[derive(Clone)]
pub struct Lowercase;

impl Normalizer for Lowercase {
    fn normalize(&self, token: &str) -> Option<String> {
        Some(token.to_lowercase())
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Trims surrounding whitespace, dropping tokens that become empty
#[derive(Clone)]
pub struct Trim;

impl Normalizer for Trim {
    fn normalize(&self, token: &str) -> Option<String> {
        let trimmed = token.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn name(&self) -> &str {
        "trim"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Drops tokens consisting solely of punctuation
#[derive(Clone)]
pub struct PunctuationFilter {
    extra: Vec<char>,
}

impl PunctuationFilter {
    pub fn new() -> Self {
        Self { extra: Vec::new() }
    }

    /// Treat additional characters as punctuation
    pub fn with_extra(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.extra.extend(chars);
        self
    }

    fn is_punctuation(&self, ch: char) -> bool {
        PUNCTUATION_CHARS.contains(&ch) || self.extra.contains(&ch)
    }
}

impl Default for PunctuationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer for PunctuationFilter {
    fn normalize(&self, token: &str) -> Option<String> {
        let punctuation_only = !token.is_empty() && token.chars().all(|c| self.is_punctuation(c));
        (!punctuation_only).then(|| token.to_string())
    }

    fn name(&self) -> &str {
        "punctuation_filter"
    }

    fn metadata(&self) -> Vec<(String, String)> {
        if self.extra.is_empty() {
            return Vec::new();
        }
        vec![("extra".to_string(), self.extra.iter().collect())]
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

/// Applies Unicode NFKC compatibility folding (full-width letters and digits
/// become their ASCII forms)
#[derive(Clone)]
pub struct UnicodeNfkc;

impl Normalizer for UnicodeNfkc {
    fn normalize(&self, token: &str) -> Option<String> {
        Some(token.nfkc().collect())
    }

    fn name(&self) -> &str {
        "unicode_nfkc"
    }

    fn clone_box(&self) -> Box<dyn Normalizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase() {
        assert_eq!(Lowercase.normalize("Hello"), Some("hello".to_string()));
        assert_eq!(Lowercase.normalize("世界"), Some("世界".to_string()));
    }

    #[test]
    fn test_trim_drops_blank() {
        assert_eq!(Trim.normalize("  word\t"), Some("word".to_string()));
        assert_eq!(Trim.normalize("   "), None);
        assert_eq!(Trim.normalize(""), None);
    }

    #[test]
    fn test_punctuation_filter() {
        let filter = PunctuationFilter::new();
        assert_eq!(filter.normalize("，。"), None);
        assert_eq!(filter.normalize("..."), None);
        assert_eq!(filter.normalize("\"'"), None);
        assert_eq!(filter.normalize("3.14"), Some("3.14".to_string()));
        assert_eq!(filter.normalize("don't"), Some("don't".to_string()));
    }

    #[test]
    fn test_curly_quotes_are_not_builtin_punctuation() {
        assert!(!is_punctuation_only("“”"));
        assert!(!is_punctuation_only("‘’"));
        assert_eq!(PunctuationFilter::new().normalize("“”"), Some("“”".to_string()));

        let filter = PunctuationFilter::new().with_extra(['“', '”', '‘', '’']);
        assert_eq!(filter.normalize("“”"), None);
    }

    #[test]
    fn test_punctuation_filter_extra_chars() {
        let filter = PunctuationFilter::new().with_extra(['~']);
        assert_eq!(filter.normalize("~~"), None);
        assert!(!is_punctuation_only("~~"));
    }

    #[test]
    fn test_nfkc_folds_full_width() {
        assert_eq!(UnicodeNfkc.normalize("ＡＢＣ１２"), Some("ABC12".to_string()));
    }
}
