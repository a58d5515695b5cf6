/*!
 * Web page input.
 *
 * Fetches a URL and reduces the HTML body to its visible text, which is then
 * analyzed like any other plain-text source.
 */

use std::time::Duration;

use log::debug;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html, Node, Selector};

use crate::errors::InputError;
use crate::subtitle_processor::normalize_whitespace;

/// User agent sent with every page request
pub const USER_AGENT: &str = "BrandAnalyzerBot/1.0";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Elements whose content never counts as visible text
const HIDDEN_ELEMENTS: [&str; 12] = [
    "script", "style", "noscript", "meta", "link", "svg", "img", "video", "audio", "picture", "source", "iframe",
];

/// Fail unless the content type announces HTML
pub fn ensure_html(content_type: Option<&str>) -> Result<(), InputError> {
    match content_type {
        Some(value) if value.to_ascii_lowercase().contains("text/html") => Ok(()),
        other => Err(InputError::NotHtml(other.unwrap_or("none").to_string())),
    }
}

/// Visible body text of an HTML document with whitespace runs collapsed
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    if let Ok(sel) = Selector::parse("body") {
        if let Some(body) = document.select(&sel).next() {
            collect_text(body, &mut text);
        }
    }

    normalize_whitespace(&text)
}

// Depth-first walk that skips hidden subtrees
fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// HTTP client for page input
pub struct WebFetcher {
    // @field: Client with timeout and user agent applied
    client: Client,
}

impl WebFetcher {
    /// Create a fetcher whose requests give up after `timeout_secs`
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch `url` and return its visible text.
    ///
    /// Non-2xx statuses and transport errors become `InputError::FetchFailed`;
    /// a response that is not `text/html` becomes `InputError::NotHtml`.
    pub async fn fetch_text(&self, url: &str) -> Result<String, InputError> {
        let failed = |e: reqwest::Error| InputError::FetchFailed {
            url: url.to_string(),
            message: e.to_string(),
        };

        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await
            .map_err(failed)?
            .error_for_status()
            .map_err(failed)?;

        let content_type = response.headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        ensure_html(content_type.as_deref())?;

        let body = response.text().await.map_err(failed)?;
        let text = visible_text(&body);
        debug!("Fetched {} bytes of HTML, {} characters of text from {}", body.len(), text.chars().count(), url);
        Ok(text)
    }
}

impl Default for WebFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}
