/*!
 * Error types for the brandspot application.
 *
 * The rule engine is infallible; these types cover the input boundary,
 * configuration and the language-model provider, using the thiserror crate
 * for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised while turning files or raw text into analysis sources
#[derive(Error, Debug)]
pub enum InputError {
    /// Only `.txt` and `.srt` files are accepted
    #[error("Unsupported file '{0}': only .txt and .srt allowed")]
    UnsupportedFile(String),

    /// File exceeds the configured per-file size limit
    #[error("File '{name}' is {size} bytes, limit is {limit} bytes")]
    FileTooLarge {
        /// File name as given by the caller
        name: String,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// File could not be read
    #[error("Failed to read '{name}': {source}")]
    Unreadable {
        /// File name as given by the caller
        name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Fetched page did not announce an HTML content type
    #[error("URL is not HTML (content type: {0})")]
    NotHtml(String),

    /// Page could not be fetched
    #[error("Failed to fetch '{url}': {message}")]
    FetchFailed {
        /// Requested URL
        url: String,
        /// Transport or status error
        message: String,
    },

    /// Nothing left to analyze after loading all inputs
    #[error("No text content found")]
    EmptyInput,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the input boundary
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Language-model mode was requested without credentials
    #[error("OpenAI API key is required when using LLM mode; set OPENAI_API_KEY or llm.api_key, or disable LLM mode")]
    MissingApiKey,

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
