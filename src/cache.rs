// this_file: src/cache.rs

//! LRU cache of analyzed paragraphs, keyed by text and configuration.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use ubidi_core::{BidiClassifier, BidiConfig, Result};
use ubidi_engine::Paragraph;
use ubidi_icu::IcuClassifier;

/// Capacity used when a cache is requested with zero entries
const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(511);

/// Key for paragraph lookups
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct AnalysisKey {
    pub text: String,
    pub config: BidiConfig,
    /// [`BidiClassifier::name`] of the classifier that produced the entry
    pub classifier: &'static str,
}

impl AnalysisKey {
    fn new(text: &str, config: &BidiConfig, classifier: &dyn BidiClassifier) -> Self {
        Self {
            text: text.to_owned(),
            config: config.clone(),
            classifier: classifier.name(),
        }
    }
}

/// Shared cache of analyzed paragraphs.
///
/// Paragraphs are immutable once built, so cached entries are handed out as
/// `Arc<Paragraph>` and may be used from several threads at once.
pub struct AnalysisCache {
    classifier: Arc<dyn BidiClassifier>,
    entries: Mutex<LruCache<AnalysisKey, Arc<Paragraph>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl AnalysisCache {
    /// Create a cache holding up to `capacity` paragraphs, using the ICU classifier.
    pub fn new(capacity: usize) -> Self {
        Self::with_classifier(capacity, IcuClassifier::shared_dyn())
    }

    pub fn with_classifier(capacity: usize, classifier: Arc<dyn BidiClassifier>) -> Self {
        Self {
            classifier,
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY),
            )),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Get a cached analysis or analyze `text` with the cache's classifier.
    ///
    /// Failed analyses are not cached.
    pub fn get_or_analyze(&self, text: &str, config: &BidiConfig) -> Result<Arc<Paragraph>> {
        self.get_or_analyze_with(text, config, &self.classifier)
    }

    /// Get a cached analysis or analyze `text` with `classifier`.
    ///
    /// Entries are keyed by classifier name, so one cache can serve
    /// analyzers built on different classifiers.
    pub fn get_or_analyze_with(
        &self,
        text: &str,
        config: &BidiConfig,
        classifier: &Arc<dyn BidiClassifier>,
    ) -> Result<Arc<Paragraph>> {
        let key = AnalysisKey::new(text, config, classifier.as_ref());
        if let Some(paragraph) = self.entries.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(paragraph.clone());
        }

        // Analyze outside the lock; a concurrent miss on the same key may analyze twice
        self.misses.fetch_add(1, Ordering::Relaxed);
        let paragraph = Arc::new(Paragraph::with_classifier(
            text,
            config.clone(),
            classifier.clone(),
        )?);
        self.entries.lock().put(key, paragraph.clone());
        Ok(paragraph)
    }

    /// Get a cached analysis made with the cache's classifier, without analyzing.
    pub fn get(&self, text: &str, config: &BidiConfig) -> Option<Arc<Paragraph>> {
        let key = AnalysisKey::new(text, config, self.classifier.as_ref());
        self.entries.lock().get(&key).cloned()
    }

    /// Clear all cached paragraphs and counters
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            entries: entries.len(),
            capacity: entries.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: usize,
    pub misses: usize,
}
