//! Chinese word breaking
//!
//! A Chinese run is handed to a [`DictionarySegmenter`] once the backend has
//! been set up, and split into single characters otherwise. Setup is
//! asynchronous and happens once per [`ChineseWordBreaker`]:
//!
//! ```text
//! Uninitialized -> Initializing -> Ready
//!                              \-> Failed
//! ```
//!
//! Concurrent callers of [`ChineseWordBreaker::initialize`] all await the
//! same in-flight load. A failed load is remembered and returned to every
//! later caller; build a fresh breaker to try again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::config::{BreakerBackend, BreakerConfig};
use crate::error::{InitError, SegmentError};

/// Per-call Chinese segmentation capability
pub trait DictionarySegmenter: Send + Sync {
    /// Split a run of Chinese characters into words, in order.
    fn cut(&self, run: &str) -> Result<Vec<String>, SegmentError>;

    fn name(&self) -> &str;
}

/// One-time, possibly slow, construction of a [`DictionarySegmenter`]
#[async_trait]
pub trait SegmenterLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn DictionarySegmenter>, InitError>;

    fn name(&self) -> &str;
}

/// Observable initialization state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

type InitFuture = Shared<BoxFuture<'static, Result<(), InitError>>>;

enum State {
    Uninitialized,
    Initializing(InitFuture),
    Ready(Arc<dyn DictionarySegmenter>),
    Failed(InitError),
}

/// Handle owning the word breaker's initialization state.
///
/// Share it with `Arc`; tokenizers hold a clone and read the state on every
/// Chinese run.
pub struct ChineseWordBreaker {
    loader: Arc<dyn SegmenterLoader>,
    state: Arc<Mutex<State>>,
}

impl ChineseWordBreaker {
    /// Create an uninitialized breaker that will set up `loader` on demand
    pub fn new(loader: Arc<dyn SegmenterLoader>) -> Self {
        Self {
            loader,
            state: Arc::new(Mutex::new(State::Uninitialized)),
        }
    }

    /// Create a breaker that is already `Ready` with `segmenter`
    pub fn ready(segmenter: Arc<dyn DictionarySegmenter>) -> Self {
        let loader = Arc::new(PreloadedLoader(Arc::clone(&segmenter)));
        Self {
            loader,
            state: Arc::new(Mutex::new(State::Ready(segmenter))),
        }
    }

    /// Create an uninitialized breaker whose backend is the single-character
    /// splitter. Until initialized it behaves identically anyway.
    pub fn char_split() -> Self {
        Self::new(Arc::new(CharSplitLoader))
    }

    /// Create an uninitialized breaker for the configured backend
    pub fn from_config(config: &BreakerConfig) -> Self {
        match config.backend {
            BreakerBackend::CharSplit => Self::char_split(),
            BreakerBackend::Jieba => Self::new(jieba_loader(config)),
        }
    }

    pub fn state(&self) -> BreakerState {
        match &*lock(&self.state) {
            State::Uninitialized => BreakerState::Uninitialized,
            State::Initializing(_) => BreakerState::Initializing,
            State::Ready(_) => BreakerState::Ready,
            State::Failed(_) => BreakerState::Failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == BreakerState::Ready
    }

    pub fn backend_name(&self) -> &str {
        self.loader.name()
    }

    /// Set up the backend. Idempotent: a no-op once ready, the shared
    /// in-flight load while initializing, and the original error once failed.
    ///
    /// The jieba backend builds its dictionary on Tokio's blocking pool, so
    /// await this inside a Tokio runtime.
    pub async fn initialize(&self) -> Result<(), InitError> {
        let pending = {
            let mut state = lock(&self.state);
            match &*state {
                State::Ready(_) => return Ok(()),
                State::Failed(err) => return Err(err.clone()),
                State::Initializing(pending) => {
                    tracing::debug!(backend = self.loader.name(), "joining in-flight initialization");
                    pending.clone()
                }
                State::Uninitialized => {
                    let pending = start_load(Arc::clone(&self.loader), Arc::clone(&self.state));
                    *state = State::Initializing(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    /// Break a Chinese run into words.
    ///
    /// Falls back to one string per character when the backend is not ready,
    /// or when this particular call fails.
    pub fn break_words(&self, run: &str) -> Vec<String> {
        let segmenter = match &*lock(&self.state) {
            State::Ready(segmenter) => Some(Arc::clone(segmenter)),
            _ => None,
        };

        let Some(segmenter) = segmenter else {
            return split_chars(run);
        };

        match segmenter.cut(run) {
            Ok(words) => {
                tracing::debug!(backend = segmenter.name(), words = words.len(), "segmented chinese run");
                words
            }
            Err(err) => {
                tracing::warn!(backend = segmenter.name(), error = %err, "segmentation failed, splitting into characters");
                split_chars(run)
            }
        }
    }
}

impl std::fmt::Debug for ChineseWordBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChineseWordBreaker")
            .field("backend", &self.loader.name())
            .field("state", &self.state())
            .finish()
    }
}

fn start_load(loader: Arc<dyn SegmenterLoader>, state: Arc<Mutex<State>>) -> InitFuture {
    async move {
        tracing::info!(backend = loader.name(), "initializing chinese word breaker");
        let outcome = loader.load().await;
        settle(&state, loader.name(), outcome)
    }
    .boxed()
    .shared()
}

fn settle(
    state: &Mutex<State>,
    backend: &str,
    outcome: Result<Arc<dyn DictionarySegmenter>, InitError>,
) -> Result<(), InitError> {
    let mut state = lock(state);
    match outcome {
        Ok(segmenter) => {
            tracing::info!(backend, "chinese word breaker ready");
            *state = State::Ready(segmenter);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(backend, error = %err, "chinese word breaker failed to initialize");
            *state = State::Failed(err.clone());
            Err(err)
        }
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One string per Unicode scalar value
pub fn split_chars(run: &str) -> Vec<String> {
    run.chars().map(String::from).collect()
}

// ============================================================================
// Built-in backends
// ============================================================================

/// Single-character splitter. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSplitter;

impl DictionarySegmenter for CharSplitter {
    fn cut(&self, run: &str) -> Result<Vec<String>, SegmentError> {
        Ok(split_chars(run))
    }

    fn name(&self) -> &str {
        "char_split"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CharSplitLoader;

#[async_trait]
impl SegmenterLoader for CharSplitLoader {
    async fn load(&self) -> Result<Arc<dyn DictionarySegmenter>, InitError> {
        Ok(Arc::new(CharSplitter))
    }

    fn name(&self) -> &str {
        "char_split"
    }
}

struct PreloadedLoader(Arc<dyn DictionarySegmenter>);

#[async_trait]
impl SegmenterLoader for PreloadedLoader {
    async fn load(&self) -> Result<Arc<dyn DictionarySegmenter>, InitError> {
        Ok(Arc::clone(&self.0))
    }

    fn name(&self) -> &str {
        self.0.name()
    }
}

#[cfg(feature = "jieba")]
fn jieba_loader(config: &BreakerConfig) -> Arc<dyn SegmenterLoader> {
    Arc::new(jieba::JiebaLoader::new(config.hmm, config.user_dict.clone()))
}

#[cfg(not(feature = "jieba"))]
fn jieba_loader(_config: &BreakerConfig) -> Arc<dyn SegmenterLoader> {
    Arc::new(UnavailableLoader)
}

/// Stands in for the jieba backend when the crate is built without it
#[cfg(not(feature = "jieba"))]
struct UnavailableLoader;

#[cfg(not(feature = "jieba"))]
#[async_trait]
impl SegmenterLoader for UnavailableLoader {
    async fn load(&self) -> Result<Arc<dyn DictionarySegmenter>, InitError> {
        Err(InitError::Unavailable(
            "built without the `jieba` feature".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "jieba"
    }
}

#[cfg(feature = "jieba")]
pub use jieba::{JiebaLoader, JiebaSegmenter};

#[cfg(feature = "jieba")]
mod jieba {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use async_trait::async_trait;
    use jieba_rs::Jieba;

    use super::{DictionarySegmenter, SegmenterLoader};
    use crate::error::{InitError, SegmentError};

    /// Maximum-probability path segmentation over jieba's frequency lexicon
    pub struct JiebaSegmenter {
        jieba: Jieba,
        hmm: bool,
    }

    impl JiebaSegmenter {
        pub fn new(jieba: Jieba, hmm: bool) -> Self {
            Self { jieba, hmm }
        }
    }

    impl DictionarySegmenter for JiebaSegmenter {
        fn cut(&self, run: &str) -> Result<Vec<String>, SegmentError> {
            Ok(self
                .jieba
                .cut(run, self.hmm)
                .into_iter()
                .map(str::to_string)
                .collect())
        }

        fn name(&self) -> &str {
            "jieba"
        }
    }

    /// Builds the default jieba dictionary, plus an optional user dictionary,
    /// on Tokio's blocking pool (or inline when polled outside a Tokio runtime)
    #[derive(Debug, Clone)]
    pub struct JiebaLoader {
        hmm: bool,
        user_dict: Option<PathBuf>,
    }

    impl JiebaLoader {
        pub fn new(hmm: bool, user_dict: Option<PathBuf>) -> Self {
            Self { hmm, user_dict }
        }
    }

    #[async_trait]
    impl SegmenterLoader for JiebaLoader {
        async fn load(&self) -> Result<Arc<dyn DictionarySegmenter>, InitError> {
            let user_dict = self.user_dict.clone();
            let jieba = match tokio::runtime::Handle::try_current() {
                Ok(handle) => handle
                    .spawn_blocking(move || build_jieba(user_dict.as_deref()))
                    .await
                    .map_err(|e| InitError::Backend(format!("dictionary build task failed: {}", e)))??,
                Err(_) => {
                    tracing::debug!("no tokio runtime, building dictionary on the calling thread");
                    build_jieba(user_dict.as_deref())?
                }
            };

            Ok(Arc::new(JiebaSegmenter::new(jieba, self.hmm)))
        }

        fn name(&self) -> &str {
            "jieba"
        }
    }

    fn build_jieba(user_dict: Option<&Path>) -> Result<Jieba, InitError> {
        let mut jieba = Jieba::new();

        if let Some(path) = user_dict {
            let dictionary_error = |reason: String| InitError::Dictionary {
                path: path.to_path_buf(),
                reason,
            };
            let file = File::open(path).map_err(|e| dictionary_error(e.to_string()))?;
            jieba
                .load_dict(&mut BufReader::new(file))
                .map_err(|e| dictionary_error(e.to_string()))?;
            tracing::debug!(path = %path.display(), "loaded user dictionary");
        }

        Ok(jieba)
    }
}
