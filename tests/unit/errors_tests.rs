/*!
 * Tests for error types
 */

use brandspot::errors::{AppError, InputError, ProviderError};

/// Test user-facing messages of input errors
#[test]
fn test_input_error_display_shouldDescribeProblem() {
    let err = InputError::UnsupportedFile("page.html".to_string());
    assert_eq!(err.to_string(), "Unsupported file 'page.html': only .txt and .srt allowed");

    assert_eq!(InputError::EmptyInput.to_string(), "No text content found");

    let err = InputError::FileTooLarge { name: "big.txt".to_string(), size: 10, limit: 5 };
    assert!(err.to_string().contains("big.txt"));

    let err = InputError::NotHtml("image/png".to_string());
    assert_eq!(err.to_string(), "URL is not HTML (content type: image/png)");
}

/// Test that the I/O cause is kept as the error source
#[test]
fn test_input_error_unreadable_shouldExposeSource() {
    use std::error::Error;

    let err = InputError::Unreadable {
        name: "a.txt".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(err.source().is_some());
}

/// Test conversions into AppError
#[test]
fn test_app_error_from_shouldWrap() {
    let app: AppError = InputError::EmptyInput.into();
    assert!(matches!(app, AppError::Input(InputError::EmptyInput)));

    let app: AppError = ProviderError::RateLimitExceeded("slow down".to_string()).into();
    assert!(app.to_string().contains("slow down"));

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let app: AppError = json_err.into();
    assert!(matches!(app, AppError::Config(_)));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app, AppError::Unknown(ref m) if m == "boom"));
}

/// Test that the missing key message points at both configuration routes
#[test]
fn test_missing_api_key_message_shouldMentionEnvironment() {
    let msg = AppError::MissingApiKey.to_string();
    assert!(msg.contains("OPENAI_API_KEY"));
    assert!(msg.contains("llm.api_key"));
}

/// Test API error formatting
#[test]
fn test_provider_error_display_shouldIncludeStatus() {
    let err = ProviderError::ApiError { status_code: 502, message: "upstream".to_string() };
    assert_eq!(err.to_string(), "API responded with error: 502 - upstream");
}
