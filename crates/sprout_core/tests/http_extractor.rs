use serde_json::json;
use sprout_core::{extract_or_empty, ExtractionError, HttpKeywordExtractor, KeywordExtractor};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn extractor(server: &MockServer, api_key: Option<&str>) -> HttpKeywordExtractor {
    HttpKeywordExtractor::new(
        &format!("{}/v1", server.uri()),
        "gpt-4o-mini",
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn parses_keywords_object_from_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(
            "{\"keywords\": [\"gardening\", \"water\", \"sunlight\"]}"
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let keywords = extractor(&server, Some("sk-test"))
        .extract_keywords("Gardening Tips\nSprouts need water and sunlight.")
        .await
        .unwrap();

    assert_eq!(keywords, vec!["gardening", "water", "sunlight"]);
}

#[tokio::test]
async fn sends_plain_text_as_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "Ideas\napp" }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(json!("[\"ideas\", \"app\"]"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let keywords = extractor(&server, None)
        .extract_keywords("Ideas\napp")
        .await
        .unwrap();
    assert_eq!(keywords, vec!["ideas", "app"]);
}

#[tokio::test]
async fn missing_content_yields_no_keywords() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(null))))
        .mount(&server)
        .await;

    let keywords = extractor(&server, None).extract_keywords("x").await.unwrap();
    assert!(keywords.is_empty());
}

#[tokio::test]
async fn api_error_surfaces_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached", "type": "requests" }
        })))
        .mount(&server)
        .await;

    let err = extractor(&server, None)
        .extract_keywords("x")
        .await
        .unwrap_err();
    match err {
        ExtractionError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_model_output_is_a_parse_error_and_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(json!("keywords: garden"))),
        )
        .mount(&server)
        .await;

    let extractor = extractor(&server, None);
    assert!(matches!(
        extractor.extract_keywords("x").await,
        Err(ExtractionError::Parse(_))
    ));
    assert!(extract_or_empty(&extractor, "x").await.is_empty());
}

#[tokio::test]
async fn unreachable_service_degrades_to_empty() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let extractor = HttpKeywordExtractor::new(
        &format!("http://127.0.0.1:{port}/v1"),
        "gpt-4o-mini",
        None,
        Duration::from_secs(2),
    )
    .unwrap();

    assert!(matches!(
        extractor.extract_keywords("x").await,
        Err(ExtractionError::Http(_))
    ));
    assert!(extract_or_empty(&extractor, "x").await.is_empty());
}
