/*!
 * Tests for provider implementations
 */

use brandspot::errors::ProviderError;
use brandspot::providers::CompletionProvider;
use brandspot::providers::mock::{MockBehavior, MockProvider};
use brandspot::providers::openai::{map_status_error, OpenAI, OpenAIRequest, DEFAULT_ENDPOINT};
use reqwest::StatusCode;

/// Test that the client falls back to the public endpoint
#[test]
fn test_openai_new_withBlankEndpoint_shouldUseDefault() {
    let client = OpenAI::new("sk-test", "  ", "gpt-4o-mini", 30);
    assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    assert_eq!(client.model(), "gpt-4o-mini");
}

/// Test that requests carry only the model and the messages
#[test]
fn test_openai_request_builder_shouldSerializeModelAndMessagesOnly() {
    let request = OpenAIRequest::new("gpt-4o-mini")
        .add_message("system", "You extract brand entities and return strict JSON arrays only.")
        .add_message("user", "prompt");

    let json = serde_json::to_value(&request).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&"model") && keys.contains(&"messages"));
    assert_eq!(json["messages"][1]["role"], "user");
}

/// Test status classification
#[test]
fn test_map_status_error_withRateLimit_shouldReturnRateLimitExceeded() {
    let err = map_status_error(StatusCode::TOO_MANY_REQUESTS, "quota".to_string());
    assert!(matches!(err, ProviderError::RateLimitExceeded(ref m) if m == "quota"));

    let err = map_status_error(StatusCode::INTERNAL_SERVER_ERROR, String::new());
    assert!(matches!(err, ProviderError::ApiError { status_code: 500, .. }));
}

/// Test that an unreachable endpoint is a connection error
#[tokio::test]
async fn test_openai_complete_withUnreachableEndpoint_shouldFail() {
    // Port 9 (discard) on localhost is expected to refuse connections
    let client = OpenAI::new("sk-test", "http://127.0.0.1:9/v1", "gpt-4o-mini", 2);
    let result = client.complete("system", "prompt").await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

/// Test the mock through the trait object
#[tokio::test]
async fn test_mock_provider_asTraitObject_shouldComplete() {
    let provider: Box<dyn CompletionProvider> = Box::new(MockProvider::replying("[]"));
    assert_eq!(provider.complete("s", "p").await.unwrap(), "[]");
    assert!(provider.test_connection().await.is_ok());
}

/// Test that slow responses still complete
#[tokio::test]
async fn test_mock_provider_slow_shouldEventuallyReply() {
    let provider = MockProvider::new(MockBehavior::Slow { delay_ms: 10 });
    assert_eq!(provider.complete("s", "p").await.unwrap(), "[]");
}
