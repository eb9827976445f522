//! Keyword extraction boundary.
//!
//! # Responsibility
//! - Define the async `KeywordExtractor` contract for the language-model
//!   collaborator.
//! - Convert note markup into the plain text the extractor consumes.
//! - Absorb extraction failures so note writes never fail because of them.
//!
//! # Invariants
//! - `extract_or_empty` never returns an error.
//! - Keywords keep their case and extraction order.

mod html;
mod http;
pub mod mock;

pub use html::strip_html;
pub use http::{HttpKeywordExtractor, DEFAULT_KEYWORD_MODEL, DEFAULT_OPENAI_BASE_URL};

use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Failure modes of one extraction call.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("keyword service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("keyword service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("keyword service response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("keyword extraction is unavailable: {0}")]
    Unavailable(String),
}

/// Extracts short keyword tags from plain text.
///
/// Implementations may be slow and may fail; callers go through
/// [`extract_or_empty`] instead of handling errors themselves.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, ExtractionError>;
}

#[async_trait]
impl<T> KeywordExtractor for Box<T>
where
    T: KeywordExtractor + ?Sized,
{
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        (**self).extract_keywords(text).await
    }
}

#[async_trait]
impl<T> KeywordExtractor for Arc<T>
where
    T: KeywordExtractor + ?Sized,
{
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        (**self).extract_keywords(text).await
    }
}

/// Runs one extraction and degrades any failure to an empty list.
pub async fn extract_or_empty<E>(extractor: &E, text: &str) -> Vec<String>
where
    E: KeywordExtractor + ?Sized,
{
    let started_at = Instant::now();
    match extractor.extract_keywords(text).await {
        Ok(keywords) => {
            let keywords = clean_keywords(keywords);
            debug!(
                "event=keyword_extract module=keywords status=ok count={} duration_ms={}",
                keywords.len(),
                started_at.elapsed().as_millis()
            );
            keywords
        }
        Err(err) => {
            warn!(
                "event=keyword_extract module=keywords status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Vec::new()
        }
    }
}

/// Builds the text sent for extraction: title and plain-text body.
pub fn extraction_text(title: &str, content: &str) -> String {
    format!("{}\n{}", title, strip_html(content))
}

/// Trims values, drops blanks and exact duplicates. Case and first-seen
/// order are kept.
pub fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .into_iter()
        .filter_map(|keyword| {
            let trimmed = keyword.trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

/// Extractor used when keyword extraction is switched off in config.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledKeywordExtractor;

#[async_trait]
impl KeywordExtractor for DisabledKeywordExtractor {
    async fn extract_keywords(&self, _text: &str) -> Result<Vec<String>, ExtractionError> {
        Err(ExtractionError::Unavailable(
            "keyword extraction disabled".to_string(),
        ))
    }
}
