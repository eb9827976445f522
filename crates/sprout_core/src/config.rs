//! Runtime configuration.
//!
//! Values come from environment variables (the CLI loads `.env` first);
//! command-line flags override them at the call site.
//!
//! | Variable | Default |
//! |---|---|
//! | `SPROUT_DB_PATH` | `sprout.sqlite3` |
//! | `SPROUT_LOG_LEVEL` | `debug` in debug builds, `info` otherwise |
//! | `SPROUT_LOG_DIR` | unset (file logging off) |
//! | `SPROUT_THEME` | `light` |
//! | `SPROUT_KEYWORD_REFRESH` | `preserve` |
//! | `SPROUT_GRAPH_STRATEGY` | `pairwise` |
//! | `SPROUT_HIGHLIGHT` | `focal` |
//! | `SPROUT_SEED_ON_EMPTY` | `false` |
//! | `SPROUT_KEYWORDS` | enabled; `disabled` turns extraction off |
//! | `AI_INTEGRATIONS_OPENAI_API_KEY` / `OPENAI_API_KEY` | unset |
//! | `AI_INTEGRATIONS_OPENAI_BASE_URL` | `https://api.openai.com/v1` |
//! | `SPROUT_KEYWORD_MODEL` | `gpt-4o-mini` |
//! | `SPROUT_KEYWORD_TIMEOUT_SECS` | `30` |

use crate::graph::{GraphStrategy, GraphTheme, HighlightMode};
use crate::keywords::{
    DisabledKeywordExtractor, ExtractionError, HttpKeywordExtractor, KeywordExtractor,
    DEFAULT_KEYWORD_MODEL, DEFAULT_OPENAI_BASE_URL,
};
use crate::logging::default_log_level;
use crate::service::note_service::KeywordRefresh;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "sprout.sqlite3";
const DEFAULT_KEYWORD_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Connection settings for the chat-completions keyword service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SproutConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub theme: GraphTheme,
    pub keyword_refresh: KeywordRefresh,
    pub graph_strategy: GraphStrategy,
    pub highlight_mode: HighlightMode,
    pub seed_on_empty: bool,
    /// `None` when extraction is disabled.
    pub extractor: Option<ExtractorConfig>,
}

impl Default for SproutConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
            theme: GraphTheme::default(),
            keyword_refresh: KeywordRefresh::default(),
            graph_strategy: GraphStrategy::default(),
            highlight_mode: HighlightMode::default(),
            seed_on_empty: false,
            extractor: Some(ExtractorConfig {
                base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
                model: DEFAULT_KEYWORD_MODEL.to_string(),
                api_key: None,
                timeout: Duration::from_secs(DEFAULT_KEYWORD_TIMEOUT_SECS),
            }),
        }
    }
}

impl SproutConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let extractor = match get("SPROUT_KEYWORDS") {
            Some(value) if value.trim().eq_ignore_ascii_case("disabled") => None,
            _ => Some(ExtractorConfig {
                base_url: get("AI_INTEGRATIONS_OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                model: get("SPROUT_KEYWORD_MODEL")
                    .unwrap_or_else(|| DEFAULT_KEYWORD_MODEL.to_string()),
                api_key: get("AI_INTEGRATIONS_OPENAI_API_KEY").or_else(|| get("OPENAI_API_KEY")),
                timeout: Duration::from_secs(parse_or(
                    "SPROUT_KEYWORD_TIMEOUT_SECS",
                    get("SPROUT_KEYWORD_TIMEOUT_SECS"),
                    DEFAULT_KEYWORD_TIMEOUT_SECS,
                )?),
            }),
        };

        Ok(Self {
            db_path: get("SPROUT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: get("SPROUT_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: get("SPROUT_LOG_DIR").map(PathBuf::from),
            theme: parse_or("SPROUT_THEME", get("SPROUT_THEME"), defaults.theme)?,
            keyword_refresh: parse_or(
                "SPROUT_KEYWORD_REFRESH",
                get("SPROUT_KEYWORD_REFRESH"),
                defaults.keyword_refresh,
            )?,
            graph_strategy: parse_or(
                "SPROUT_GRAPH_STRATEGY",
                get("SPROUT_GRAPH_STRATEGY"),
                defaults.graph_strategy,
            )?,
            highlight_mode: parse_or(
                "SPROUT_HIGHLIGHT",
                get("SPROUT_HIGHLIGHT"),
                defaults.highlight_mode,
            )?,
            seed_on_empty: parse_bool("SPROUT_SEED_ON_EMPTY", get("SPROUT_SEED_ON_EMPTY"))?,
            extractor,
        })
    }

    /// Builds the keyword extractor these settings describe.
    pub fn keyword_extractor(&self) -> Result<Box<dyn KeywordExtractor>, ExtractionError> {
        match &self.extractor {
            Some(settings) => Ok(Box::new(HttpKeywordExtractor::new(
                &settings.base_url,
                settings.model.clone(),
                settings.api_key.clone(),
                settings.timeout,
            )?)),
            None => Ok(Box::new(DisabledKeywordExtractor)),
        }
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            message: err.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(|raw| raw.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key,
                message: format!("expected a boolean, got `{raw}`"),
            }),
        },
    }
}
