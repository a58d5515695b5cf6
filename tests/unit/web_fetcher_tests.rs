/*!
 * Tests for fetching web pages as input
 */

use anyhow::Result;

use brandspot::errors::InputError;
use brandspot::web_fetcher::{visible_text, WebFetcher};
use crate::common;

const PAGE: &str = "<html><head><script>track('Pepsi')</script></head><body><p>Order an   Uber</p>\n<img alt=\"Lyft\"><p>or a taxi.</p></body></html>";

/// Test that an HTML page is reduced to its visible text
#[tokio::test]
async fn test_fetch_text_withHtmlPage_shouldReturnVisibleText() -> Result<()> {
    let url = common::serve_once("200 OK", "text/html; charset=utf-8", PAGE).await?;

    let text = WebFetcher::default().fetch_text(&url).await?;

    assert_eq!(text, "Order an Uber or a taxi.");
    Ok(())
}

/// Test that a non-HTML response is refused
#[tokio::test]
async fn test_fetch_text_withJsonResponse_shouldFailNotHtml() -> Result<()> {
    let url = common::serve_once("200 OK", "application/json", r#"{"brand":"Uber"}"#).await?;

    let err = WebFetcher::default().fetch_text(&url).await.unwrap_err();

    assert!(matches!(&err, InputError::NotHtml(t) if t == "application/json"));
    assert!(err.to_string().starts_with("URL is not HTML"));
    Ok(())
}

/// Test that an error status fails the fetch
#[tokio::test]
async fn test_fetch_text_withNotFound_shouldFailFetch() -> Result<()> {
    let url = common::serve_once("404 Not Found", "text/html", "<p>missing</p>").await?;

    let err = WebFetcher::new(5).fetch_text(&url).await.unwrap_err();

    assert!(matches!(&err, InputError::FetchFailed { url: u, .. } if *u == url));
    Ok(())
}

/// Test that text inside hidden elements is dropped at any depth
#[test]
fn test_visible_text_withNestedHiddenElements_shouldSkipThem() {
    let html = "<body><div>Watch <iframe>Hulu</iframe><span>Netflix<style>.a{}</style></span></div></body>";
    assert_eq!(visible_text(html), "Watch Netflix");
}
