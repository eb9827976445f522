//! HTTP keyword extractor over an OpenAI-compatible chat completions API.
//!
//! Works with OpenAI itself and with any gateway exposing
//! `POST {base_url}/chat/completions` (LiteLLM, Ollama, vLLM, ...).

use super::{ExtractionError, KeywordExtractor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_KEYWORD_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You are a keyword extraction tool. Extract 3-5 main keywords or \
concepts from the text. Return ONLY a JSON object of the form {\"keywords\": [\"keyword1\", \
\"keyword2\"]}. Do not include markdown formatting or explanation.";

/// Chat-completions backed extractor.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpKeywordExtractor {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl HttpKeywordExtractor {
    /// Creates an extractor for `{base_url}/chat/completions`.
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl KeywordExtractor for HttpKeywordExtractor {
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = self.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&raw)
                .ok()
                .and_then(|err| err.error)
                .map(|detail| detail.message)
                .unwrap_or(raw);
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&raw)?;
        let Some(content) = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
        else {
            return Ok(Vec::new());
        };

        parse_keyword_payload(&content)
    }
}

/// Reads keywords out of the model's JSON reply.
///
/// Accepts `{"keywords": [...]}` and a bare array; any other JSON shape
/// yields no keywords. Non-string array items are skipped.
fn parse_keyword_payload(content: &str) -> Result<Vec<String>, ExtractionError> {
    let value: Value = serde_json::from_str(content.trim())?;
    let items = match value {
        Value::Object(mut map) => match map.remove("keywords") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Value::Array(items) => items,
        _ => Vec::new(),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(keyword) => Some(keyword),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{parse_keyword_payload, HttpKeywordExtractor};
    use std::time::Duration;

    #[test]
    fn endpoint_is_derived_from_base_url() {
        let extractor = HttpKeywordExtractor::new(
            "http://localhost:4000/v1/",
            "test-model",
            Some(String::new()),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(extractor.endpoint(), "http://localhost:4000/v1/chat/completions");
        assert_eq!(extractor.model(), "test-model");
        assert!(extractor.api_key.is_none());
    }

    #[test]
    fn payload_accepts_object_and_bare_array() {
        assert_eq!(
            parse_keyword_payload(r#"{"keywords": ["garden", "water"]}"#).unwrap(),
            vec!["garden", "water"]
        );
        assert_eq!(
            parse_keyword_payload(r#"["garden", 3, "sun"]"#).unwrap(),
            vec!["garden", "sun"]
        );
    }

    #[test]
    fn payload_without_keywords_is_empty() {
        assert!(parse_keyword_payload(r#"{"topics": ["x"]}"#).unwrap().is_empty());
        assert!(parse_keyword_payload(r#""garden""#).unwrap().is_empty());
        assert!(parse_keyword_payload("not json").is_err());
    }
}
