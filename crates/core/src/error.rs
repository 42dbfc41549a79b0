//! Error types
//!
//! Only backend setup and configuration loading can fail. Tokenization,
//! similarity, diffing and highlighting are total.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of the one-time Chinese word breaker setup.
///
/// `Clone` because every caller waiting on the same in-flight setup
/// receives the same outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("Word breaker backend failed to load: {0}")]
    Backend(String),

    #[error("Failed to load dictionary {path:?}: {reason}")]
    Dictionary { path: PathBuf, reason: String },

    #[error("Word breaker backend unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a single segmentation call on a ready backend.
///
/// Never surfaces to callers: the run falls back to single characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Segmentation failed for run {run:?}: {reason}")]
pub struct SegmentError {
    pub run: String,
    pub reason: String,
}

impl SegmentError {
    pub fn new(run: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            run: run.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}
