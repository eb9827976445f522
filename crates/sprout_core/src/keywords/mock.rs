//! In-process extractors for tests and offline runs.

use super::{ExtractionError, KeywordExtractor};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns the same keyword list for every input and counts calls.
#[derive(Debug, Default)]
pub struct StaticKeywordExtractor {
    keywords: Vec<String>,
    calls: AtomicUsize,
}

impl StaticKeywordExtractor {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of extraction calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeywordExtractor for StaticKeywordExtractor {
    async fn extract_keywords(&self, _text: &str) -> Result<Vec<String>, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.keywords.clone())
    }
}

/// Fails every call, as an unreachable model service would.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingKeywordExtractor;

#[async_trait]
impl KeywordExtractor for FailingKeywordExtractor {
    async fn extract_keywords(&self, _text: &str) -> Result<Vec<String>, ExtractionError> {
        Err(ExtractionError::Api {
            status: 503,
            message: "model unavailable".to_string(),
        })
    }
}
