//! Configuration for the comparison engine
//!
//! Built in code with the `with_*` builder methods, or loaded from layered
//! sources with [`load_config`]:
//!
//! 1. Environment variables (prefix `TEXTCOMPARE_`, nesting separator `__`)
//! 2. Configuration file (`textcompare.toml`, or an explicit path)
//! 3. Defaults
//!
//! e.g. `TEXTCOMPARE_BREAKER__BACKEND=char_split`,
//! `TEXTCOMPARE_NORMALIZATION__UNICODE_NFKC=true`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::algorithm::DiffAlgorithmKind;
use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "textcompare";
const ENV_PREFIX: &str = "TEXTCOMPARE";

/// Configuration for text comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Alignment algorithm for both diff granularities
    #[serde(default)]
    pub algorithm: DiffAlgorithmKind,

    /// Token normalization steps
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Chinese word breaker backend
    #[serde(default)]
    pub breaker: BreakerConfig,
}

/// Token normalization steps, applied in the order listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// NFKC compatibility folding (full-width forms to ASCII)
    #[serde(default)]
    pub unicode_nfkc: bool,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    #[serde(default = "default_true")]
    pub trim: bool,

    /// Drop tokens made only of punctuation
    #[serde(default = "default_true")]
    pub drop_punctuation: bool,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            unicode_nfkc: false,
            lowercase: true,
            trim: true,
            drop_punctuation: true,
        }
    }
}

/// Which implementation breaks Chinese runs into words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerBackend {
    /// Dictionary segmentation with jieba
    Jieba,
    /// One token per character
    CharSplit,
}

impl Default for BreakerBackend {
    fn default() -> Self {
        if cfg!(feature = "jieba") {
            Self::Jieba
        } else {
            Self::CharSplit
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakerConfig {
    #[serde(default)]
    pub backend: BreakerBackend,

    /// Let jieba guess out-of-vocabulary words with its HMM
    #[serde(default)]
    pub hmm: bool,

    /// Extra jieba-format dictionary (`word [freq] [tag]` per line)
    #[serde(default)]
    pub user_dict: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl CompareConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that never touches a dictionary
    pub fn char_split() -> Self {
        Self::new().with_breaker_backend(BreakerBackend::CharSplit)
    }

    /// Set the diff algorithm
    pub fn with_algorithm(mut self, algorithm: DiffAlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the normalization steps
    pub fn with_normalization(mut self, normalization: NormalizationConfig) -> Self {
        self.normalization = normalization;
        self
    }

    /// Enable or disable NFKC folding
    pub fn with_unicode_nfkc(mut self, enable: bool) -> Self {
        self.normalization.unicode_nfkc = enable;
        self
    }

    pub fn with_breaker_backend(mut self, backend: BreakerBackend) -> Self {
        self.breaker.backend = backend;
        self
    }

    pub fn with_hmm(mut self, enable: bool) -> Self {
        self.breaker.hmm = enable;
        self
    }

    pub fn with_user_dict(mut self, path: impl Into<PathBuf>) -> Self {
        self.breaker.user_dict = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.breaker.user_dict {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(
                    "breaker.user_dict cannot be empty".to_string(),
                ));
            }
            if self.breaker.backend == BreakerBackend::CharSplit {
                return Err(ConfigError::Validation(
                    "breaker.user_dict requires the jieba backend".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Load configuration from `textcompare.toml` (if present) and the environment
pub fn load_config() -> Result<CompareConfig, ConfigError> {
    load_config_from_path(None)
}

/// Load configuration, reading `config_path` instead of searching for
/// `textcompare.toml`. An explicit path must exist.
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<CompareConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("algorithm", "myers")?
        .set_default("normalization.unicode_nfkc", false)?
        .set_default("normalization.lowercase", true)?
        .set_default("normalization.trim", true)?
        .set_default("normalization.drop_punctuation", true)?
        .set_default("breaker.hmm", false)?;

    builder = match config_path {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder.add_source(File::with_name(CONFIG_FILE_NAME).required(false)),
    };

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: CompareConfig = builder
        .build()?
        .try_deserialize()
        .map_err(|e| ConfigError::Parse(format!("Failed to deserialize config: {}", e)))?;

    config.validate()?;

    tracing::debug!(
        algorithm = config.algorithm.name(),
        backend = ?config.breaker.backend,
        "loaded comparison config"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CompareConfig::default();
        assert_eq!(config.algorithm, DiffAlgorithmKind::Myers);
        assert!(config.normalization.lowercase);
        assert!(config.normalization.drop_punctuation);
        assert!(!config.normalization.unicode_nfkc);
        assert!(!config.breaker.hmm);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = CompareConfig::new()
            .with_algorithm(DiffAlgorithmKind::Patience)
            .with_unicode_nfkc(true)
            .with_hmm(true);

        assert_eq!(config.algorithm, DiffAlgorithmKind::Patience);
        assert!(config.normalization.unicode_nfkc);
        assert!(config.breaker.hmm);
    }

    #[test]
    fn test_validation_rejects_user_dict_without_dictionary_backend() {
        let config = CompareConfig::char_split().with_user_dict("words.txt");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = CompareConfig::new()
            .with_breaker_backend(BreakerBackend::Jieba)
            .with_user_dict("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
algorithm = "patience"

[normalization]
unicode_nfkc = true

[breaker]
backend = "char_split"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.algorithm, DiffAlgorithmKind::Patience);
        assert!(config.normalization.unicode_nfkc);
        assert!(config.normalization.lowercase);
        assert_eq!(config.breaker.backend, BreakerBackend::CharSplit);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config_from_path(Some(Path::new("/nonexistent/textcompare.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_partial_input_uses_serde_defaults() {
        let config: CompareConfig = from_json(r#"{"breaker": {"hmm": true}}"#);
        assert!(config.breaker.hmm);
        assert!(config.normalization.trim);
        assert_eq!(config.algorithm, DiffAlgorithmKind::Myers);
    }

    fn from_json(json: &str) -> CompareConfig {
        serde_json::from_str(json).unwrap()
    }
}
