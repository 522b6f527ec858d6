// this_file: src/batch.rs

//! Batch analysis of many independent texts in parallel.

use crate::cache::AnalysisCache;
use crate::report::UnitReport;
use log::warn;
use rayon::prelude::*;
use std::sync::Arc;
use ubidi_core::{BidiClassifier, BidiConfig, Result, WriteOptions};
use ubidi_engine::Paragraph;
use ubidi_icu::IcuClassifier;

/// Item to be analyzed in batch.
#[derive(Debug, Clone, Default)]
pub struct BatchItem {
    /// Text to analyze
    pub text: String,
    /// Analysis configuration
    pub config: BidiConfig,
    /// Options for the reordered text in the report
    pub write_options: WriteOptions,
}

impl BatchItem {
    pub fn new(text: impl Into<String>, config: BidiConfig) -> Self {
        Self {
            text: text.into(),
            config,
            write_options: WriteOptions::empty(),
        }
    }
}

/// Result from batch analysis.
#[derive(Debug)]
pub struct BatchResult {
    /// Index of the item in the batch
    pub index: usize,
    /// Report or error
    pub result: Result<UnitReport>,
}

/// Batch analyzer for parallel paragraph analysis.
pub struct BatchAnalyzer {
    classifier: Arc<dyn BidiClassifier>,
    cache: Option<Arc<AnalysisCache>>,
}

impl Default for BatchAnalyzer {
    fn default() -> Self {
        Self::new(IcuClassifier::shared_dyn())
    }
}

impl BatchAnalyzer {
    /// Create a new batch analyzer with the given classifier.
    pub fn new(classifier: Arc<dyn BidiClassifier>) -> Self {
        Self {
            classifier,
            cache: None,
        }
    }

    /// Look paragraphs up in `cache` before analyzing them.
    pub fn with_cache(mut self, cache: Arc<AnalysisCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Analyze a batch of items in parallel. Results keep the input order.
    pub fn analyze_batch(&self, items: Vec<BatchItem>) -> Vec<BatchResult> {
        items
            .into_par_iter()
            .enumerate()
            .map(|(index, item)| BatchResult {
                index,
                result: self.analyze_single(&item),
            })
            .collect()
    }

    /// Analyze a batch with a specific number of threads.
    ///
    /// Falls back to the global pool when the dedicated pool cannot be built.
    pub fn analyze_batch_with_threads(
        &self,
        items: Vec<BatchItem>,
        num_threads: usize,
    ) -> Vec<BatchResult> {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
        {
            Ok(pool) => pool.install(|| self.analyze_batch(items)),
            Err(err) => {
                warn!("Could not build a {num_threads}-thread pool ({err}), using the global pool");
                self.analyze_batch(items)
            }
        }
    }

    /// Analyze a single item.
    fn analyze_single(&self, item: &BatchItem) -> Result<UnitReport> {
        let paragraph = match &self.cache {
            Some(cache) => {
                cache.get_or_analyze_with(&item.text, &item.config, &self.classifier)?
            }
            None => Arc::new(Paragraph::with_classifier(
                &item.text,
                item.config.clone(),
                self.classifier.clone(),
            )?),
        };
        Ok(UnitReport::for_paragraph(&paragraph, item.write_options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tests::AllRtl;
    use ubidi_core::Direction;

    fn items() -> Vec<BatchItem> {
        ["abc", "\u{5d0}\u{5d1}\u{5d2}", "abc \u{5d0}\u{5d1} def", ""]
            .iter()
            .map(|text| BatchItem::new(*text, BidiConfig::new()))
            .collect()
    }

    #[test]
    fn test_results_keep_order() {
        let results = BatchAnalyzer::default().analyze_batch(items());
        assert_eq!(results.len(), 4);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.index, i);
        }
        let directions: Vec<Direction> = results
            .iter()
            .map(|r| r.result.as_ref().unwrap().direction)
            .collect();
        assert_eq!(
            directions,
            vec![Direction::Ltr, Direction::Rtl, Direction::Mixed, Direction::Ltr]
        );
    }

    #[test]
    fn test_with_threads_matches_default_pool() {
        let analyzer = BatchAnalyzer::default();
        let parallel = analyzer.analyze_batch(items());
        let pooled = analyzer.analyze_batch_with_threads(items(), 2);
        for (a, b) in parallel.iter().zip(&pooled) {
            assert_eq!(a.result.as_ref().unwrap(), b.result.as_ref().unwrap());
        }
    }

    #[test]
    fn test_cached_analysis_keeps_classifier() {
        let classifier: Arc<dyn BidiClassifier> = Arc::new(AllRtl);
        let batch = vec![BatchItem::new("abc", BidiConfig::new())];
        let uncached = BatchAnalyzer::new(classifier.clone()).analyze_batch(batch.clone());
        let cached = BatchAnalyzer::new(classifier)
            .with_cache(Arc::new(AnalysisCache::new(8)))
            .analyze_batch(batch);
        assert_eq!(uncached[0].result.as_ref().unwrap().direction, Direction::Rtl);
        assert_eq!(cached[0].result.as_ref().unwrap().direction, Direction::Rtl);
    }

    #[test]
    fn test_cache_is_used() {
        let cache = Arc::new(AnalysisCache::new(8));
        let analyzer = BatchAnalyzer::default().with_cache(cache.clone());
        let mut batch = items();
        batch.extend(items());
        analyzer.analyze_batch(batch);
        let stats = cache.stats();
        assert_eq!(stats.entries, 4);
        assert_eq!(stats.hits + stats.misses, 8);
    }
}
